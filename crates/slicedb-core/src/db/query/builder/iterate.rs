use crate::{
    db::{
        executor::{SliceExecutor, SliceIterator},
        query::{
            builder::{Filtered, Iterate, PagedFacade, Partitioned, SliceQuery},
            error::QueryError,
        },
    },
    traits::{EntityKind, EntityValue},
    value::Value,
};

impl<X, E, F, S> SliceQuery<'_, X, E, F, S>
where
    E: EntityKind,
    F: PagedFacade,
    S: Filtered,
{
    // Iteration always pages; fall back to the configured page size.
    pub(super) fn ensure_fetch_size(&mut self) -> Result<u32, QueryError> {
        if let Some(fetch_size) = self.descriptor.fetch_size() {
            return Ok(fetch_size);
        }

        let page_size = self.descriptor.default_page_size();
        self.descriptor.set_fetch_size(page_size)?;

        Ok(page_size)
    }
}

impl<'a, X, E, S> SliceQuery<'a, X, E, Iterate, S>
where
    X: SliceExecutor,
    E: EntityValue,
    S: Filtered,
{
    /// Lazily iterate matching rows, one page per round trip.
    pub fn iterator(mut self) -> Result<SliceIterator<'a, X, E>, QueryError> {
        let page_size = self.ensure_fetch_size()?;
        let slice = self.resolve()?;

        Ok(self.executor.iterator::<E>(slice, page_size))
    }

    pub fn iterator_with_page_size(
        self,
        page_size: u32,
    ) -> Result<SliceIterator<'a, X, E>, QueryError> {
        self.with_fetch_size(page_size)?.iterator()
    }
}

impl<'a, X, E> SliceQuery<'a, X, E, Iterate, Partitioned>
where
    X: SliceExecutor,
    E: EntityValue,
{
    /// Iterate rows whose clustering prefix equals `keys`.
    pub fn iterator_with_matching<I>(self, keys: I) -> Result<SliceIterator<'a, X, E>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.with_clusterings(keys)?.iterator()
    }

    pub fn iterator_with_matching_and_page_size<I>(
        self,
        page_size: u32,
        keys: I,
    ) -> Result<SliceIterator<'a, X, E>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.with_fetch_size(page_size)?
            .with_clusterings(keys)?
            .iterator()
    }
}
