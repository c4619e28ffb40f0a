use crate::{
    db::{
        executor::SliceExecutor,
        query::{
            builder::{Delete, Filtered, Partitioned, SliceQuery},
            error::QueryError,
        },
    },
    traits::EntityKind,
    value::Value,
};

impl<X, E, S> SliceQuery<'_, X, E, Delete, S>
where
    X: SliceExecutor,
    E: EntityKind,
    S: Filtered,
{
    /// Remove every row matching the slice.
    pub fn delete(self) -> Result<(), QueryError> {
        let slice = self.resolve()?;
        self.executor.delete::<E>(&slice)?;

        Ok(())
    }
}

impl<X, E> SliceQuery<'_, X, E, Delete, Partitioned>
where
    X: SliceExecutor,
    E: EntityKind,
{
    /// Remove rows whose clustering prefix equals `keys`.
    pub fn delete_matching<I>(self, keys: I) -> Result<(), QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.with_clusterings(keys)?.delete()
    }
}
