//! Staged slice builder.
//!
//! One `SliceQuery` type wraps the descriptor for every stage. The stage
//! and facade type parameters narrow the callable surface, so an illegal
//! call sequence (an equality filter after a range, a bounding mode on an
//! exact match, a limit on a delete) does not compile.

mod asynchronous;
mod delete;
mod iterate;
mod select;
mod stage;


pub use stage::*;

use crate::{
    db::{
        consistency::ConsistencyLevel,
        query::{
            bounds::{BoundingMode, OrderingMode},
            descriptor::{MatchingShortcut, ResolvedSlice, SliceDescriptor},
            error::{QueryError, SliceError},
        },
    },
    traits::EntityKind,
    value::Value,
};
use std::{fmt, marker::PhantomData};

///
/// SliceQuery
///
/// Session-bound slice builder.
/// `F` selects the terminal family, `S` the position in the call chain.
///

pub struct SliceQuery<'a, X, E, F, S>
where
    E: EntityKind,
{
    executor: &'a X,
    descriptor: SliceDescriptor,
    _marker: PhantomData<fn() -> (E, F, S)>,
}

impl<'a, X, E, F, S> SliceQuery<'a, X, E, F, S>
where
    E: EntityKind,
{
    // Every stage change reuses the same descriptor.
    fn transition<T>(self) -> SliceQuery<'a, X, E, F, T> {
        SliceQuery {
            executor: self.executor,
            descriptor: self.descriptor,
            _marker: PhantomData,
        }
    }

    fn step(mut self, step: impl FnOnce(&mut SliceDescriptor)) -> Self {
        step(&mut self.descriptor);
        self
    }

    fn try_step(
        mut self,
        step: impl FnOnce(&mut SliceDescriptor) -> Result<(), SliceError>,
    ) -> Result<Self, QueryError> {
        step(&mut self.descriptor)?;
        Ok(self)
    }
}

impl<'a, X, E, F> SliceQuery<'a, X, E, F, Start>
where
    E: EntityKind,
    F: Facade,
{
    pub(crate) const fn new(executor: &'a X, descriptor: SliceDescriptor) -> Self {
        Self {
            executor,
            descriptor,
            _marker: PhantomData,
        }
    }

    /// Bind the leading partition key components.
    pub fn with_partition_components<I>(
        self,
        values: I,
    ) -> Result<SliceQuery<'a, X, E, F, Partitioned>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = collect_values(values);

        self.try_step(|d| d.set_partition_components(values))
            .map(Self::transition)
    }

    /// Bind an IN list to the only partition key component.
    ///
    /// Entities with a composite partition key must bind the leading
    /// components first and use `and_partition_components_in`.
    pub fn with_partition_components_in<I>(
        self,
        values: I,
    ) -> Result<SliceQuery<'a, X, E, F, Partitioned>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = collect_values(values);

        self.try_step(|d| d.set_partition_components_in(values))
            .map(Self::transition)
    }
}

impl<'a, X, E, F> SliceQuery<'a, X, E, F, Partitioned>
where
    E: EntityKind,
    F: Facade,
{
    /// Bind an IN list to the last partition key component.
    pub fn and_partition_components_in<I>(self, values: I) -> Result<Self, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = collect_values(values);

        self.try_step(|d| d.set_partition_components_in(values))
    }

    /// Start a clustering range at `values`.
    pub fn from_clusterings<I>(
        self,
        values: I,
    ) -> Result<SliceQuery<'a, X, E, F, RangeFrom>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = collect_values(values);

        self.try_step(|d| d.set_from_clusterings(values))
            .map(Self::transition)
    }

    /// End a clustering range at `values`.
    pub fn to_clusterings<I>(self, values: I) -> Result<SliceQuery<'a, X, E, F, RangeTo>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = collect_values(values);

        self.try_step(|d| d.set_to_clusterings(values))
            .map(Self::transition)
    }

    /// Match an exact clustering prefix.
    pub fn with_clusterings<I>(self, values: I) -> Result<SliceQuery<'a, X, E, F, Exact>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = collect_values(values);

        self.try_step(|d| d.set_clusterings(values))
            .map(Self::transition)
    }
}

impl<'a, X, E, F> SliceQuery<'a, X, E, F, Partitioned>
where
    E: EntityKind,
    F: ReadFacade,
{
    // Shared entry for the `*_matching` shortcuts: `[keys, keys]` range plus
    // the shortcut's own limit and ordering.
    fn matching<I>(
        self,
        shortcut: MatchingShortcut,
        keys: I,
    ) -> Result<SliceQuery<'a, X, E, F, RangeBoth>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let keys = collect_values(keys);

        self.try_step(|d| d.apply_matching_shortcut(shortcut, keys))
            .map(Self::transition)
    }
}

impl<'a, X, E, F> SliceQuery<'a, X, E, F, RangeFrom>
where
    E: EntityKind,
    F: Facade,
{
    pub fn to_clusterings<I>(
        self,
        values: I,
    ) -> Result<SliceQuery<'a, X, E, F, RangeBoth>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = collect_values(values);

        self.try_step(|d| d.set_to_clusterings(values))
            .map(Self::transition)
    }
}

impl<'a, X, E, F> SliceQuery<'a, X, E, F, RangeTo>
where
    E: EntityKind,
    F: Facade,
{
    pub fn from_clusterings<I>(
        self,
        values: I,
    ) -> Result<SliceQuery<'a, X, E, F, RangeBoth>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = collect_values(values);

        self.try_step(|d| d.set_from_clusterings(values))
            .map(Self::transition)
    }
}

impl<'a, X, E, F> SliceQuery<'a, X, E, F, Exact>
where
    E: EntityKind,
    F: Facade,
{
    /// Follow the exact prefix with an IN list on the last clustering column.
    pub fn and_clusterings_in<I>(
        self,
        values: I,
    ) -> Result<SliceQuery<'a, X, E, F, ExactIn>, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = collect_values(values);

        self.try_step(|d| d.set_clusterings_in(values))
            .map(Self::transition)
    }
}

// ----------------------------------------------------------------------
// Bounding (range stages only)
// ----------------------------------------------------------------------

impl<X, E, F, S> SliceQuery<'_, X, E, F, S>
where
    E: EntityKind,
    F: Facade,
    S: Ranged,
{
    #[must_use]
    pub fn with_bounding(self, bounding: BoundingMode) -> Self {
        self.step(|d| d.set_bounding(bounding))
    }

    #[must_use]
    pub fn with_inclusive_bounds(self) -> Self {
        self.with_bounding(BoundingMode::InclusiveBounds)
    }

    #[must_use]
    pub fn with_exclusive_bounds(self) -> Self {
        self.with_bounding(BoundingMode::ExclusiveBounds)
    }

    #[must_use]
    pub fn from_inclusive_to_exclusive_bounds(self) -> Self {
        self.with_bounding(BoundingMode::InclusiveStartBoundOnly)
    }

    #[must_use]
    pub fn from_exclusive_to_inclusive_bounds(self) -> Self {
        self.with_bounding(BoundingMode::InclusiveEndBoundOnly)
    }
}

// ----------------------------------------------------------------------
// Common setters and inspection
// ----------------------------------------------------------------------

impl<X, E, F, S> SliceQuery<'_, X, E, F, S>
where
    E: EntityKind,
    F: Facade,
    S: Filtered,
{
    #[must_use]
    pub const fn descriptor(&self) -> &SliceDescriptor {
        &self.descriptor
    }

    /// Resolve without executing; useful for explain output.
    pub fn resolve(&self) -> Result<ResolvedSlice, QueryError> {
        Ok(self.descriptor.resolve()?)
    }

    #[must_use]
    pub fn with_consistency(self, consistency: ConsistencyLevel) -> Self {
        self.step(|d| d.set_consistency(consistency))
    }
}

impl<X, E, F, S> SliceQuery<'_, X, E, F, S>
where
    E: EntityKind,
    F: ReadFacade,
    S: Filtered,
{
    #[must_use]
    pub fn ordering(self, ordering: OrderingMode) -> Self {
        self.step(|d| d.set_ordering(ordering))
    }

    #[must_use]
    pub fn order_by_ascending(self) -> Self {
        self.ordering(OrderingMode::Ascending)
    }

    #[must_use]
    pub fn order_by_descending(self) -> Self {
        self.ordering(OrderingMode::Descending)
    }

    /// Bound the number of returned rows; must be strictly positive.
    pub fn limit(self, limit: u32) -> Result<Self, QueryError> {
        self.try_step(|d| d.set_limit(limit))
    }

    /// Return every matching row.
    #[must_use]
    pub fn without_limit(self) -> Self {
        self.step(SliceDescriptor::disable_limit)
    }
}

impl<X, E, F, S> SliceQuery<'_, X, E, F, S>
where
    E: EntityKind,
    F: PagedFacade,
    S: Filtered,
{
    /// Rows fetched per round trip; must be strictly positive.
    ///
    /// Combined with a partition IN list, no ordering reaches the executor:
    /// rows come back in storage order. An explicit ordering is dropped and a
    /// `SliceDiagnostic` is recorded instead.
    pub fn with_fetch_size(self, fetch_size: u32) -> Result<Self, QueryError> {
        self.try_step(|d| d.set_fetch_size(fetch_size))
    }
}

impl<X, E, F, S> fmt::Debug for SliceQuery<'_, X, E, F, S>
where
    E: EntityKind,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceQuery")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

fn collect_values<I>(values: I) -> Vec<Value>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    values.into_iter().map(Into::into).collect()
}
