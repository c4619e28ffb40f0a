//! In-memory reference store.
//!
//! Implements both executor contracts over plain vectors so the builder can
//! be exercised end to end without a cluster. Rows are kept in storage
//! order: partition values first, then each clustering column in its
//! declared physical direction.


use crate::{
    db::{
        executor::{AsyncSliceExecutor, Page, PagingState, SliceExecutor},
        query::{
            bounds::OrderingMode,
            descriptor::{ResolvedSlice, Restriction},
        },
        row::Row,
    },
    error::InternalError,
    model::{entity::EntityModel, field::ClusteringOrder},
    traits::{EntityKind, EntityValue},
    value::Value,
};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::{
    cmp::Ordering,
    collections::BTreeMap,
    sync::atomic::{AtomicUsize, Ordering as AtomicOrdering},
};

///
/// MemoryStore
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<BTreeMap<&'static str, Table>>,
    failure: Mutex<Option<InternalError>>,
    page_fetches: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one entity, keyed by its full primary key.
    pub fn insert<E: EntityValue>(&self, entity: &E) -> Result<(), InternalError> {
        let stored = StoredRow::from_row(E::MODEL, entity.to_row())?;

        let mut tables = self.tables.write();
        let table = tables
            .entry(E::MODEL.entity_name)
            .or_insert_with(|| Table::new(E::MODEL));
        table.upsert(stored);

        Ok(())
    }

    /// Insert every entity in `entities`.
    pub fn insert_all<'e, E, I>(&self, entities: I) -> Result<(), InternalError>
    where
        E: EntityValue + 'e,
        I: IntoIterator<Item = &'e E>,
    {
        entities.into_iter().try_for_each(|entity| self.insert(entity))
    }

    /// Number of rows stored for entity `E`.
    #[must_use]
    pub fn len<E: EntityKind>(&self) -> usize {
        self.tables
            .read()
            .get(E::MODEL.entity_name)
            .map_or(0, |table| table.rows.len())
    }

    /// Fail the next executor call with `err`.
    pub fn inject_failure(&self, err: InternalError) {
        *self.failure.lock() = Some(err);
    }

    /// Number of pages served so far.
    #[must_use]
    pub fn page_fetches(&self) -> usize {
        self.page_fetches.load(AtomicOrdering::Relaxed)
    }

    fn check_failure(&self) -> Result<(), InternalError> {
        self.failure.lock().take().map_or(Ok(()), Err)
    }

    // Matching rows in result order with the limit applied.
    fn select_rows(&self, slice: &ResolvedSlice) -> Result<Vec<Row>, InternalError> {
        self.check_failure()?;

        let tables = self.tables.read();
        let Some(table) = tables.get(slice.entity) else {
            return Ok(Vec::new());
        };

        let mut matches: Vec<&StoredRow> = table
            .rows
            .iter()
            .filter(|stored| stored.matches(slice))
            .collect();

        if let Some(ordering) = &slice.ordering {
            let orders = table.model.clustering_order();
            matches.sort_by(|a, b| {
                compare_clustering(&a.clustering, &b.clustering, &orders)
                    .then_with(|| compare_values(&a.partition, &b.partition))
            });
            if ordering.effective == OrderingMode::Descending {
                matches.reverse();
            }
        }

        let limit = slice
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(matches
            .into_iter()
            .take(limit)
            .map(|stored| stored.row.clone())
            .collect())
    }
}

impl SliceExecutor for MemoryStore {
    fn get<E: EntityValue>(&self, slice: &ResolvedSlice) -> Result<Vec<E>, InternalError> {
        self.select_rows(slice)?
            .iter()
            .map(|row| E::from_row(row).map_err(InternalError::from))
            .collect()
    }

    fn fetch_page<E: EntityValue>(
        &self,
        slice: &ResolvedSlice,
        page_size: u32,
        state: Option<&PagingState>,
    ) -> Result<Page<E>, InternalError> {
        let rows = self.select_rows(slice)?;
        let offset = state.map_or(Ok(0), decode_offset)?;
        let page_size = usize::try_from(page_size).unwrap_or(usize::MAX);
        let end = offset.saturating_add(page_size).min(rows.len());

        let page = rows
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|row| E::from_row(row).map_err(InternalError::from))
            .collect::<Result<Vec<_>, _>>()?;
        self.page_fetches.fetch_add(1, AtomicOrdering::Relaxed);

        Ok(Page {
            rows: page,
            next: (end < rows.len()).then(|| encode_offset(end)),
        })
    }

    fn delete<E: EntityKind>(&self, slice: &ResolvedSlice) -> Result<(), InternalError> {
        self.check_failure()?;

        if let Some(table) = self.tables.write().get_mut(slice.entity) {
            let before = table.rows.len();
            table.rows.retain(|stored| !stored.matches(slice));
            tracing::debug!(
                entity = slice.entity,
                removed = before - table.rows.len(),
                "deleted slice rows"
            );
        }

        Ok(())
    }
}

#[async_trait]
impl AsyncSliceExecutor for MemoryStore {
    async fn get<E: EntityValue>(&self, slice: &ResolvedSlice) -> Result<Vec<E>, InternalError> {
        <Self as SliceExecutor>::get::<E>(self, slice)
    }

    async fn fetch_page<E: EntityValue>(
        &self,
        slice: &ResolvedSlice,
        page_size: u32,
        state: Option<&PagingState>,
    ) -> Result<Page<E>, InternalError> {
        <Self as SliceExecutor>::fetch_page::<E>(self, slice, page_size, state)
    }

    async fn delete<E: EntityKind>(&self, slice: &ResolvedSlice) -> Result<(), InternalError> {
        <Self as SliceExecutor>::delete::<E>(self, slice)
    }
}

///
/// Table
///

#[derive(Debug)]
struct Table {
    model: &'static EntityModel,
    rows: Vec<StoredRow>,
}

impl Table {
    const fn new(model: &'static EntityModel) -> Self {
        Self {
            model,
            rows: Vec::new(),
        }
    }

    fn upsert(&mut self, stored: StoredRow) {
        let orders = self.model.clustering_order();
        let position = self
            .rows
            .binary_search_by(|probe| probe.storage_cmp(&stored, &orders));

        match position {
            Ok(index) => self.rows[index] = stored,
            Err(index) => self.rows.insert(index, stored),
        }
    }
}

///
/// StoredRow
/// A row plus its extracted key, in declaration order.
///

#[derive(Debug)]
struct StoredRow {
    partition: Vec<Value>,
    clustering: Vec<Value>,
    row: Row,
}

impl StoredRow {
    fn from_row(model: &EntityModel, row: Row) -> Result<Self, InternalError> {
        let extract = |names: Vec<&'static str>| -> Result<Vec<Value>, InternalError> {
            names
                .into_iter()
                .map(|name| row.require(name).cloned().map_err(InternalError::from))
                .collect()
        };
        let partition = extract(model.partition_key_names(model.partition_arity()))?;
        let clustering = extract(model.clustering_key_names(model.clustering_arity()))?;

        Ok(Self {
            partition,
            clustering,
            row,
        })
    }

    fn storage_cmp(&self, other: &Self, orders: &[ClusteringOrder]) -> Ordering {
        compare_values(&self.partition, &other.partition)
            .then_with(|| compare_clustering(&self.clustering, &other.clustering, orders))
    }

    fn matches(&self, slice: &ResolvedSlice) -> bool {
        slice
            .restrictions()
            .all(|restriction| self.satisfies(restriction))
    }

    fn satisfies(&self, restriction: &Restriction) -> bool {
        match restriction {
            Restriction::Eq { column, value } => self.row.get(*column) == Some(value),
            Restriction::In { column, values } => self
                .row
                .get(*column)
                .is_some_and(|stored| values.contains(stored)),
            Restriction::Slice {
                columns,
                op,
                values,
            } => {
                let stored: Option<Vec<&Value>> =
                    columns.iter().map(|column| self.row.get(*column)).collect();

                stored
                    .and_then(|stored| compare_tuple(&stored, values))
                    .is_some_and(|ordering| op.matches(ordering))
            }
        }
    }
}

fn compare_values(a: &[Value], b: &[Value]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(a, b)| a.compare(b).unwrap_or(Ordering::Equal))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn compare_clustering(a: &[Value], b: &[Value], orders: &[ClusteringOrder]) -> Ordering {
    a.iter()
        .zip(b)
        .zip(orders)
        .map(|((a, b), order)| {
            let ordering = a.compare(b).unwrap_or(Ordering::Equal);
            if order.is_reversed() {
                ordering.reverse()
            } else {
                ordering
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

// Lexicographic comparison of a stored key prefix against a bound tuple.
fn compare_tuple(stored: &[&Value], bound: &[Value]) -> Option<Ordering> {
    for (stored, bound) in stored.iter().zip(bound) {
        match stored.compare(bound)? {
            Ordering::Equal => {}
            ordering => return Some(ordering),
        }
    }

    Some(Ordering::Equal)
}

fn encode_offset(offset: usize) -> PagingState {
    PagingState::new(u64::try_from(offset).unwrap_or(u64::MAX).to_be_bytes().to_vec())
}

fn decode_offset(state: &PagingState) -> Result<usize, InternalError> {
    let bytes: [u8; 8] = state.as_bytes().try_into().map_err(|_| {
        InternalError::serialize_corruption(format!(
            "paging state must be 8 bytes, found {}",
            state.as_bytes().len()
        ))
    })?;

    usize::try_from(u64::from_be_bytes(bytes))
        .map_err(|_| InternalError::serialize_corruption("paging state offset out of range"))
}
