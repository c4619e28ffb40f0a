use crate::{
    db::{
        executor::{Page, PagingState, iter::PageCursor},
        query::{
            descriptor::{ResolvedSlice, SliceKind},
            error::QueryError,
        },
        response::Response,
    },
    error::InternalError,
    traits::{EntityKind, EntityValue},
};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll, ready},
};

///
/// AsyncSliceExecutor
///
/// Non-blocking mirror of `SliceExecutor`.
/// Futures returned here must be `Send`; they are driven by whatever
/// runtime the caller uses.
///

#[async_trait]
pub trait AsyncSliceExecutor: Sync {
    async fn get<E: EntityValue>(&self, slice: &ResolvedSlice) -> Result<Vec<E>, InternalError>;

    async fn get_one<E: EntityValue>(
        &self,
        slice: &ResolvedSlice,
    ) -> Result<Option<E>, InternalError> {
        Ok(self.get::<E>(slice).await?.into_iter().next())
    }

    async fn fetch_page<E: EntityValue>(
        &self,
        slice: &ResolvedSlice,
        page_size: u32,
        state: Option<&PagingState>,
    ) -> Result<Page<E>, InternalError>;

    async fn delete<E: EntityKind>(&self, slice: &ResolvedSlice) -> Result<(), InternalError>;
}

///
/// AsyncListener
/// Completion handler registered on an async slice; called exactly once.
///

pub type AsyncListener = Box<dyn FnOnce(Result<&Completed, &QueryError>) + Send + 'static>;

///
/// Completed
/// What listeners see when an async slice finishes successfully.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Completed {
    pub entity: &'static str,
    pub kind: SliceKind,
    /// Rows materialized by the terminal (first page only for iteration).
    pub rows: usize,
}

///
/// Empty
/// Completion sentinel for async terminals with no row payload.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Empty;

///
/// SliceOutput
/// Payloads an async terminal can resolve to.
///

pub trait SliceOutput {
    fn rows(&self) -> usize;
}

impl<E: EntityKind> SliceOutput for Response<E> {
    fn rows(&self) -> usize {
        self.len()
    }
}

impl<E: EntityKind> SliceOutput for Option<E> {
    fn rows(&self) -> usize {
        usize::from(self.is_some())
    }
}

impl SliceOutput for Empty {
    fn rows(&self) -> usize {
        0
    }
}

///
/// SliceFuture
///
/// Future returned by async terminals.
/// Listeners run when the inner future completes, before the payload is
/// handed to the caller. Listener order is unspecified.
///

pub struct SliceFuture<'a, T> {
    inner: BoxFuture<'a, Result<T, QueryError>>,
    listeners: Vec<AsyncListener>,
    entity: &'static str,
    kind: SliceKind,
}

impl<'a, T> SliceFuture<'a, T> {
    pub(crate) fn new(
        inner: BoxFuture<'a, Result<T, QueryError>>,
        listeners: Vec<AsyncListener>,
        entity: &'static str,
        kind: SliceKind,
    ) -> Self {
        Self {
            inner,
            listeners,
            entity,
            kind,
        }
    }
}

impl<T: SliceOutput> Future for SliceFuture<'_, T> {
    type Output = Result<T, QueryError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        let result = ready!(this.inner.as_mut().poll(cx));

        let listeners = std::mem::take(&mut this.listeners);
        if !listeners.is_empty() {
            tracing::trace!(
                entity = this.entity,
                listeners = listeners.len(),
                ok = result.is_ok(),
                "notifying slice listeners"
            );
        }

        match &result {
            Ok(output) => {
                let completed = Completed {
                    entity: this.entity,
                    kind: this.kind,
                    rows: output.rows(),
                };
                for listener in listeners {
                    listener(Ok(&completed));
                }
            }
            Err(err) => {
                for listener in listeners {
                    listener(Err(err));
                }
            }
        }

        Poll::Ready(result)
    }
}

impl<T> fmt::Debug for SliceFuture<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceFuture")
            .field("entity", &self.entity)
            .field("kind", &self.kind)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

///
/// AsyncSlicePages
///
/// Async counterpart of `SliceIterator`. The first page is fetched by the
/// terminal's future; later pages are fetched on demand.
///

pub struct AsyncSlicePages<'a, X, E> {
    executor: &'a X,
    slice: ResolvedSlice,
    page_size: u32,
    cursor: PageCursor<E>,
}

impl<X, E> fmt::Debug for AsyncSlicePages<'_, X, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncSlicePages")
            .field("entity", &self.slice.entity)
            .field("page_size", &self.page_size)
            .field("buffered", &self.cursor.buffered())
            .finish_non_exhaustive()
    }
}

impl<'a, X, E> AsyncSlicePages<'a, X, E>
where
    X: AsyncSliceExecutor,
    E: EntityValue,
{
    pub(crate) async fn open(
        executor: &'a X,
        slice: ResolvedSlice,
        page_size: u32,
    ) -> Result<Self, QueryError> {
        let mut pages = Self {
            executor,
            cursor: PageCursor::new(slice.entity),
            slice,
            page_size,
        };
        pages.fill().await?;

        Ok(pages)
    }

    #[must_use]
    pub const fn slice(&self) -> &ResolvedSlice {
        &self.slice
    }

    #[must_use]
    pub fn buffered(&self) -> usize {
        self.cursor.buffered()
    }

    /// Next page of rows; `None` once the slice is exhausted.
    pub async fn next_page(&mut self) -> Option<Result<Vec<E>, QueryError>> {
        while self.cursor.buffered() == 0 {
            self.cursor.pending()?;
            if let Err(err) = self.fill().await {
                return Some(Err(err));
            }
        }

        Some(Ok(self.cursor.drain()))
    }

    /// Next single row, fetching a page when the buffer runs dry.
    pub async fn next_row(&mut self) -> Option<Result<E, QueryError>> {
        loop {
            if let Some(row) = self.cursor.pop() {
                return Some(Ok(row));
            }
            self.cursor.pending()?;
            if let Err(err) = self.fill().await {
                return Some(Err(err));
            }
        }
    }

    /// Drain every remaining row.
    pub async fn try_collect(mut self) -> Result<Vec<E>, QueryError> {
        let mut rows = Vec::new();
        while let Some(page) = self.next_page().await {
            rows.extend(page?);
        }

        Ok(rows)
    }

    async fn fill(&mut self) -> Result<(), QueryError> {
        let Some(state) = self.cursor.pending() else {
            return Ok(());
        };
        let state = state.cloned();

        match self
            .executor
            .fetch_page::<E>(&self.slice, self.page_size, state.as_ref())
            .await
        {
            Ok(page) => {
                self.cursor.absorb(page);
                Ok(())
            }
            Err(err) => Err(self.cursor.fail(err)),
        }
    }
}

impl<X, E> SliceOutput for AsyncSlicePages<'_, X, E> {
    fn rows(&self) -> usize {
        self.cursor.buffered()
    }
}
