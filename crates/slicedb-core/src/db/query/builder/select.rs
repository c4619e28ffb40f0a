use crate::{
    db::{
        executor::SliceExecutor,
        query::{
            builder::{Filtered, Partitioned, Select, SliceQuery},
            descriptor::MatchingShortcut,
            error::QueryError,
        },
        response::Response,
    },
    traits::EntityValue,
    value::Value,
};

impl<X, E, S> SliceQuery<'_, X, E, Select, S>
where
    X: SliceExecutor,
    E: EntityValue,
    S: Filtered,
{
    /// Execute and materialize every matching row, up to the limit.
    pub fn get(self) -> Result<Response<E>, QueryError> {
        let slice = self.resolve()?;
        let rows = self.executor.get::<E>(&slice)?;

        Ok(Response::new(rows))
    }

    /// Execute with an explicit limit.
    pub fn get_with_limit(self, limit: u32) -> Result<Response<E>, QueryError> {
        self.limit(limit)?.get()
    }

    /// Execute with `limit = 1`, whatever limit was configured before.
    pub fn get_one(mut self) -> Result<Option<E>, QueryError> {
        self.descriptor.force_limit(1);
        let slice = self.resolve()?;

        Ok(self.executor.get_one::<E>(&slice)?)
    }
}

impl<X, E> SliceQuery<'_, X, E, Select, Partitioned>
where
    X: SliceExecutor,
    E: EntityValue,
{
    /// Rows whose clustering prefix equals `keys`.
    pub fn get_matching<I>(self, keys: I) -> Result<Response<E>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.with_clusterings(keys)?.get()
    }

    /// First `limit` rows in the `[keys, keys]` range, in ascending order.
    pub fn get_first_matching<I>(self, limit: u32, keys: I) -> Result<Response<E>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.matching(MatchingShortcut::First { limit }, keys)?
            .get()
    }

    /// Last `limit` rows in the `[keys, keys]` range, in descending order.
    pub fn get_last_matching<I>(self, limit: u32, keys: I) -> Result<Response<E>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.matching(MatchingShortcut::Last { limit }, keys)?
            .get()
    }

    /// At most one row in the `[keys, keys]` range.
    pub fn get_one_matching<I>(self, keys: I) -> Result<Option<E>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.matching(MatchingShortcut::One, keys)?.get_one()
    }
}
