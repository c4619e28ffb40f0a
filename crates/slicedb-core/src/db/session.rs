use crate::{
    config::{ConfigError, SliceConfig},
    db::query::{
        builder::{
            AsyncDelete, AsyncIterate, AsyncSelect, Delete, Facade, Iterate, Select, SliceQuery,
            Start,
        },
        descriptor::SliceDescriptor,
    },
    traits::EntityKind,
};
use std::marker::PhantomData;

///
/// SliceSession
///
/// Owns an executor and the defaults every descriptor starts from.
/// Cheap to share: builders only borrow the executor.
///

#[derive(Debug)]
pub struct SliceSession<X> {
    executor: X,
    config: SliceConfig,
}

impl<X> SliceSession<X> {
    /// Session over `executor`; fails if `config` has a zero limit or page size.
    pub fn new(executor: X, config: SliceConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self { executor, config })
    }

    /// Session with the default limit, page size and consistency.
    #[must_use]
    pub fn with_defaults(executor: X) -> Self {
        Self {
            executor,
            config: SliceConfig::default(),
        }
    }

    #[must_use]
    pub const fn executor(&self) -> &X {
        &self.executor
    }

    #[must_use]
    pub const fn config(&self) -> &SliceConfig {
        &self.config
    }

    /// Entry point for slice queries over entity `E`.
    #[must_use]
    pub const fn slice<E: EntityKind>(&self) -> EntitySlices<'_, X, E> {
        EntitySlices {
            executor: &self.executor,
            config: &self.config,
            _marker: PhantomData,
        }
    }
}

///
/// EntitySlices
/// Per-entity DSL root: one fresh descriptor per `for_*` call.
///

pub struct EntitySlices<'a, X, E> {
    executor: &'a X,
    config: &'a SliceConfig,
    _marker: PhantomData<fn() -> E>,
}

impl<X, E> Clone for EntitySlices<'_, X, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<X, E> Copy for EntitySlices<'_, X, E> {}

impl<'a, X, E: EntityKind> EntitySlices<'a, X, E> {
    fn open<F: Facade>(self) -> SliceQuery<'a, X, E, F, Start> {
        let descriptor = SliceDescriptor::new(E::MODEL, F::KIND, self.config);

        SliceQuery::new(self.executor, descriptor)
    }

    #[must_use]
    pub fn for_select(self) -> SliceQuery<'a, X, E, Select, Start> {
        self.open()
    }

    #[must_use]
    pub fn for_iteration(self) -> SliceQuery<'a, X, E, Iterate, Start> {
        self.open()
    }

    #[must_use]
    pub fn for_delete(self) -> SliceQuery<'a, X, E, Delete, Start> {
        self.open()
    }

    /// Same entry points, with future-returning terminals.
    #[must_use]
    pub const fn asynchronous(self) -> AsyncEntitySlices<'a, X, E> {
        AsyncEntitySlices { inner: self }
    }
}

///
/// AsyncEntitySlices
///

pub struct AsyncEntitySlices<'a, X, E> {
    inner: EntitySlices<'a, X, E>,
}

impl<'a, X, E: EntityKind> AsyncEntitySlices<'a, X, E> {
    #[must_use]
    pub fn for_select(self) -> SliceQuery<'a, X, E, AsyncSelect, Start> {
        self.inner.open()
    }

    #[must_use]
    pub fn for_iteration(self) -> SliceQuery<'a, X, E, AsyncIterate, Start> {
        self.inner.open()
    }

    #[must_use]
    pub fn for_delete(self) -> SliceQuery<'a, X, E, AsyncDelete, Start> {
        self.inner.open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{ArticleRating, RecordingExecutor};

    #[test]
    fn zero_default_limit_is_rejected() {
        let err = SliceSession::new(
            RecordingExecutor::new(),
            SliceConfig::default().with_default_limit(0),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "default_limit"
            }
        ));
    }

    #[test]
    fn zero_default_page_size_is_rejected() {
        let result = SliceSession::new(
            RecordingExecutor::new(),
            SliceConfig::default().with_default_page_size(0),
        );

        assert!(result.is_err());
    }

    #[test]
    fn valid_config_seeds_every_descriptor() {
        let session = SliceSession::new(
            RecordingExecutor::new(),
            SliceConfig::default().with_default_limit(5),
        )
        .unwrap();

        let slice = session
            .slice::<ArticleRating>()
            .for_select()
            .with_partition_components([1])
            .unwrap()
            .resolve()
            .unwrap();

        assert_eq!(slice.limit, Some(5));
    }
}
