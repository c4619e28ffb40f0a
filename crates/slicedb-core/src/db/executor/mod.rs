//! Executor contracts.
//!
//! The builder never talks to a store directly: every terminal hands a
//! `ResolvedSlice` to one of these traits. Execution errors come back as
//! `InternalError` and are passed through unchanged.

mod asynchronous;
mod iter;

pub use asynchronous::*;
pub use iter::*;

use crate::{
    db::query::descriptor::ResolvedSlice,
    error::InternalError,
    traits::{EntityKind, EntityValue},
};

///
/// PagingState
///
/// Opaque continuation token returned by an executor with each page.
/// Only the executor that produced it can interpret the bytes.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PagingState(Vec<u8>);

impl PagingState {
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

///
/// Page
/// One round trip worth of rows; `next` is absent on the last page.
///

#[derive(Debug)]
pub struct Page<E> {
    pub rows: Vec<E>,
    pub next: Option<PagingState>,
}

impl<E> Page<E> {
    #[must_use]
    pub const fn last(rows: Vec<E>) -> Self {
        Self { rows, next: None }
    }
}

///
/// SliceExecutor
///
/// Blocking execution of resolved slices.
/// Implementors own statement syntax, consistency semantics, and transport.
///

pub trait SliceExecutor {
    /// Return every row matching `slice`, honoring its limit and ordering.
    fn get<E: EntityValue>(&self, slice: &ResolvedSlice) -> Result<Vec<E>, InternalError>;

    /// Return the first matching row; absence is `Ok(None)`, never an error.
    fn get_one<E: EntityValue>(&self, slice: &ResolvedSlice) -> Result<Option<E>, InternalError> {
        Ok(self.get::<E>(slice)?.into_iter().next())
    }

    /// Fetch one page of at most `page_size` rows, resuming from `state`.
    fn fetch_page<E: EntityValue>(
        &self,
        slice: &ResolvedSlice,
        page_size: u32,
        state: Option<&PagingState>,
    ) -> Result<Page<E>, InternalError>;

    /// Remove every row matching `slice`.
    fn delete<E: EntityKind>(&self, slice: &ResolvedSlice) -> Result<(), InternalError>;

    /// Lazily iterate `slice`, one page at a time.
    fn iterator<E: EntityValue>(
        &self,
        slice: ResolvedSlice,
        page_size: u32,
    ) -> SliceIterator<'_, Self, E>
    where
        Self: Sized,
    {
        SliceIterator::new(self, slice, page_size)
    }
}
