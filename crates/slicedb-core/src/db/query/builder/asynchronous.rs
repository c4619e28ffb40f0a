//! Async terminals.
//!
//! Validation and resolution still happen synchronously, so a malformed
//! chain fails before a future exists. Only execution is deferred.

use crate::{
    db::{
        executor::{AsyncSliceExecutor, AsyncSlicePages, Completed, Empty, SliceFuture},
        query::{
            builder::{
                AsyncDelete, AsyncFacade, AsyncIterate, AsyncSelect, Filtered, Partitioned,
                SliceQuery,
            },
            descriptor::{MatchingShortcut, ResolvedSlice},
            error::QueryError,
        },
        response::Response,
    },
    traits::{EntityKind, EntityValue},
    value::Value,
};
use futures::{FutureExt, future::BoxFuture};

impl<'a, X, E, F, S> SliceQuery<'a, X, E, F, S>
where
    E: EntityKind,
    F: AsyncFacade,
    S: Filtered,
{
    /// Register a completion handler; it sees either the completion
    /// summary or the execution error.
    #[must_use]
    pub fn with_listener<L>(mut self, listener: L) -> Self
    where
        L: FnOnce(Result<&Completed, &QueryError>) + Send + 'static,
    {
        self.descriptor.push_listener(Box::new(listener));
        self
    }

    // Resolve now; only `run` is deferred into the returned future.
    fn into_future<T>(
        mut self,
        run: impl FnOnce(&'a X, ResolvedSlice) -> BoxFuture<'a, Result<T, QueryError>>,
    ) -> Result<SliceFuture<'a, T>, QueryError> {
        let slice = self.resolve()?;
        let listeners = self.descriptor.take_listeners();
        let (entity, kind) = (slice.entity, slice.kind);

        Ok(SliceFuture::new(
            run(self.executor, slice),
            listeners,
            entity,
            kind,
        ))
    }
}

// ----------------------------------------------------------------------
// AsyncSelect
// ----------------------------------------------------------------------

impl<'a, X, E, S> SliceQuery<'a, X, E, AsyncSelect, S>
where
    X: AsyncSliceExecutor,
    E: EntityValue,
    S: Filtered,
{
    pub fn get(self) -> Result<SliceFuture<'a, Response<E>>, QueryError> {
        self.into_future(|executor, slice| {
            async move {
                let rows = executor.get::<E>(&slice).await?;
                Ok::<_, QueryError>(Response::new(rows))
            }
            .boxed()
        })
    }

    pub fn get_with_limit(self, limit: u32) -> Result<SliceFuture<'a, Response<E>>, QueryError> {
        self.limit(limit)?.get()
    }

    /// Resolve with `limit = 1`, whatever limit was configured before.
    pub fn get_one(mut self) -> Result<SliceFuture<'a, Option<E>>, QueryError> {
        self.descriptor.force_limit(1);
        self.into_future(|executor, slice| {
            async move { Ok::<_, QueryError>(executor.get_one::<E>(&slice).await?) }.boxed()
        })
    }
}

impl<'a, X, E> SliceQuery<'a, X, E, AsyncSelect, Partitioned>
where
    X: AsyncSliceExecutor,
    E: EntityValue,
{
    pub fn get_matching<I>(self, keys: I) -> Result<SliceFuture<'a, Response<E>>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.with_clusterings(keys)?.get()
    }

    pub fn get_first_matching<I>(
        self,
        limit: u32,
        keys: I,
    ) -> Result<SliceFuture<'a, Response<E>>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.matching(MatchingShortcut::First { limit }, keys)?
            .get()
    }

    pub fn get_last_matching<I>(
        self,
        limit: u32,
        keys: I,
    ) -> Result<SliceFuture<'a, Response<E>>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.matching(MatchingShortcut::Last { limit }, keys)?
            .get()
    }

    pub fn get_one_matching<I>(self, keys: I) -> Result<SliceFuture<'a, Option<E>>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.matching(MatchingShortcut::One, keys)?.get_one()
    }
}

// ----------------------------------------------------------------------
// AsyncIterate
// ----------------------------------------------------------------------

impl<'a, X, E, S> SliceQuery<'a, X, E, AsyncIterate, S>
where
    X: AsyncSliceExecutor,
    E: EntityValue,
    S: Filtered,
{
    /// Resolves once the first page has been fetched.
    pub fn iterator(
        mut self,
    ) -> Result<SliceFuture<'a, AsyncSlicePages<'a, X, E>>, QueryError> {
        let page_size = self.ensure_fetch_size()?;

        self.into_future(move |executor, slice| {
            AsyncSlicePages::open(executor, slice, page_size).boxed()
        })
    }

    pub fn iterator_with_page_size(
        self,
        page_size: u32,
    ) -> Result<SliceFuture<'a, AsyncSlicePages<'a, X, E>>, QueryError> {
        self.with_fetch_size(page_size)?.iterator()
    }
}

impl<'a, X, E> SliceQuery<'a, X, E, AsyncIterate, Partitioned>
where
    X: AsyncSliceExecutor,
    E: EntityValue,
{
    pub fn iterator_with_matching<I>(
        self,
        keys: I,
    ) -> Result<SliceFuture<'a, AsyncSlicePages<'a, X, E>>, QueryError>
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
    ) -> Result<SliceFuture<'a, AsyncSlicePages<'a, X, E>>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.with_fetch_size(page_size)?
            .with_clusterings(keys)?
            .iterator()
    }
}

// ----------------------------------------------------------------------
// AsyncDelete
// ----------------------------------------------------------------------

impl<'a, X, E, S> SliceQuery<'a, X, E, AsyncDelete, S>
where
    X: AsyncSliceExecutor,
    E: EntityKind,
    S: Filtered,
{
    /// Resolves to the `Empty` sentinel once the rows are gone.
    pub fn delete(self) -> Result<SliceFuture<'a, Empty>, QueryError> {
        self.into_future(|executor, slice| {
            async move {
                executor.delete::<E>(&slice).await?;
                Ok::<_, QueryError>(Empty)
            }
            .boxed()
        })
    }
}

impl<'a, X, E> SliceQuery<'a, X, E, AsyncDelete, Partitioned>
where
    X: AsyncSliceExecutor,
    E: EntityKind,
{
    pub fn delete_matching<I>(self, keys: I) -> Result<SliceFuture<'a, Empty>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.with_clusterings(keys)?.delete()
    }
}
