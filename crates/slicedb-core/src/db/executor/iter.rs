use crate::{
    db::{
        executor::{Page, PagingState, SliceExecutor},
        query::{descriptor::ResolvedSlice, error::QueryError},
    },
    error::InternalError,
    traits::EntityValue,
};
use std::{collections::VecDeque, fmt, iter::FusedIterator};

///
/// PageCursor
///
/// Buffer and continuation bookkeeping shared by the blocking iterator and
/// the async page stream. Once exhausted or failed it never fetches again.
///

#[derive(Debug)]
pub(crate) struct PageCursor<E> {
    entity: &'static str,
    buffer: VecDeque<E>,
    state: CursorState,
    pages: u32,
}

#[derive(Debug)]
enum CursorState {
    Unstarted,
    More(PagingState),
    Exhausted,
}

impl<E> PageCursor<E> {
    pub(crate) const fn new(entity: &'static str) -> Self {
        Self {
            entity,
            buffer: VecDeque::new(),
            state: CursorState::Unstarted,
            pages: 0,
        }
    }

    pub(crate) fn pop(&mut self) -> Option<E> {
        self.buffer.pop_front()
    }

    pub(crate) fn drain(&mut self) -> Vec<E> {
        self.buffer.drain(..).collect()
    }

    pub(crate) fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Continuation for the next fetch; `None` when nothing is left to fetch.
    pub(crate) const fn pending(&self) -> Option<Option<&PagingState>> {
        match &self.state {
            CursorState::Unstarted => Some(None),
            CursorState::More(state) => Some(Some(state)),
            CursorState::Exhausted => None,
        }
    }

    pub(crate) fn absorb(&mut self, page: Page<E>) {
        self.pages += 1;
        tracing::trace!(
            entity = self.entity,
            page = self.pages,
            rows = page.rows.len(),
            last = page.next.is_none(),
            "fetched slice page"
        );

        self.buffer.extend(page.rows);
        self.state = page.next.map_or(CursorState::Exhausted, CursorState::More);
    }

    pub(crate) fn fail(&mut self, err: InternalError) -> QueryError {
        self.buffer.clear();
        self.state = CursorState::Exhausted;

        err.into()
    }
}

///
/// SliceIterator
///
/// Lazy, page-at-a-time iteration over one resolved slice.
/// A page is fetched only when the buffer runs dry. The iterator is not
/// restartable: build a new query to iterate again.
///

pub struct SliceIterator<'a, X, E> {
    executor: &'a X,
    slice: ResolvedSlice,
    page_size: u32,
    cursor: PageCursor<E>,
}

impl<'a, X, E> SliceIterator<'a, X, E>
where
    X: SliceExecutor,
    E: EntityValue,
{
    pub(crate) const fn new(executor: &'a X, slice: ResolvedSlice, page_size: u32) -> Self {
        Self {
            executor,
            cursor: PageCursor::new(slice.entity),
            slice,
            page_size,
        }
    }

    #[must_use]
    pub const fn slice(&self) -> &ResolvedSlice {
        &self.slice
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows already fetched but not yet yielded.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.cursor.buffered()
    }
}

impl<X, E> fmt::Debug for SliceIterator<'_, X, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceIterator")
            .field("entity", &self.slice.entity)
            .field("page_size", &self.page_size)
            .field("buffered", &self.cursor.buffered())
            .finish_non_exhaustive()
    }
}

impl<X, E> Iterator for SliceIterator<'_, X, E>
where
    X: SliceExecutor,
    E: EntityValue,
{
    type Item = Result<E, QueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.cursor.pop() {
                return Some(Ok(row));
            }

            let state = self.cursor.pending()?.cloned();
            match self
                .executor
                .fetch_page::<E>(&self.slice, self.page_size, state.as_ref())
            {
                Ok(page) => self.cursor.absorb(page),
                Err(err) => return Some(Err(self.cursor.fail(err))),
            }
        }
    }
}

impl<X, E> FusedIterator for SliceIterator<'_, X, E>
where
    X: SliceExecutor,
    E: EntityValue,
{
}
