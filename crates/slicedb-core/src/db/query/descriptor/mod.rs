//! Slice descriptor: the single mutable aggregate threaded through every
//! builder stage, and its resolution into an executor-ready `ResolvedSlice`.

mod resolved;
#[cfg(test)]
mod tests;

use crate::{
    config::SliceConfig,
    db::{
        consistency::ConsistencyLevel,
        executor::AsyncListener,
        query::{
            bounds::{BoundingMode, CompareOp, OrderingMode},
            error::SliceError,
            validate::KeyValidator,
        },
    },
    model::entity::{EntityModel, KeyKind},
    value::Value,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use resolved::*;

///
/// SliceKind
/// Which terminal family a descriptor was created for.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum SliceKind {
    #[display("select")]
    Select,
    #[display("iterate")]
    Iterate,
    #[display("delete")]
    Delete,
}

impl SliceKind {
    /// Deletes never carry a row limit; reads start from the configured default.
    const fn initial_limit(self) -> LimitSpec {
        match self {
            Self::Select | Self::Iterate => LimitSpec::Default,
            Self::Delete => LimitSpec::Disabled,
        }
    }
}

///
/// LimitSpec
/// Distinguishes the implicit default limit from an explicit caller choice.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LimitSpec {
    #[default]
    Default,
    Explicit(u32),
    Disabled,
}

///
/// ClusteringFilter
///
/// The two mutually exclusive clustering filter modes.
/// `Exact` may end with an IN list on the next column; `Range` carries
/// independent from/to component lists.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ClusteringFilter {
    #[default]
    None,
    Exact {
        values: Vec<Value>,
        in_values: Option<Vec<Value>>,
    },
    Range {
        from: Option<Vec<Value>>,
        to: Option<Vec<Value>>,
    },
}

///
/// SliceDiagnostic
/// Non-fatal adjustments recorded while building a descriptor.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum SliceDiagnostic {
    /// Paging combined with a partition IN clause cannot honor an explicit
    /// ordering; the ordering was dropped.
    OrderingDroppedForPagedIn { entity: &'static str },
}

impl fmt::Display for SliceDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrderingDroppedForPagedIn { entity } => write!(
                f,
                "ordering dropped for entity '{entity}': paging cannot be combined with ordering over a partition IN clause"
            ),
        }
    }
}

///
/// MatchingShortcut
/// Root-level terminal shortcuts that imply a from/to pair on the same keys.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MatchingShortcut {
    First { limit: u32 },
    Last { limit: u32 },
    One,
}

impl MatchingShortcut {
    const fn name(self) -> &'static str {
        match self {
            Self::First { .. } => "get_first_matching",
            Self::Last { .. } => "get_last_matching",
            Self::One => "get_one_matching",
        }
    }
}

///
/// SliceDescriptor
///
/// All query intent for one slice, mutated in place by the staged builder.
/// Consumed by exactly one terminal operation; never shared across threads
/// while it is being built.
///

pub struct SliceDescriptor {
    model: &'static EntityModel,
    kind: SliceKind,
    default_limit: u32,
    default_page_size: u32,
    default_consistency: ConsistencyLevel,
    partition: Vec<Value>,
    partition_in: Option<Vec<Value>>,
    clustering: ClusteringFilter,
    ordering: Option<OrderingMode>,
    ordering_dropped: bool,
    bounding: BoundingMode,
    limit: LimitSpec,
    fetch_size: Option<u32>,
    consistency: Option<ConsistencyLevel>,
    listeners: Vec<AsyncListener>,
    diagnostics: Vec<SliceDiagnostic>,
}

impl SliceDescriptor {
    #[must_use]
    pub fn new(model: &'static EntityModel, kind: SliceKind, config: &SliceConfig) -> Self {
        Self {
            model,
            kind,
            default_limit: config.default_limit,
            default_page_size: config.default_page_size,
            default_consistency: config.default_consistency,
            partition: Vec::new(),
            partition_in: None,
            clustering: ClusteringFilter::None,
            ordering: None,
            ordering_dropped: false,
            bounding: BoundingMode::default(),
            limit: kind.initial_limit(),
            fetch_size: None,
            consistency: None,
            listeners: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn model(&self) -> &'static EntityModel {
        self.model
    }

    #[must_use]
    pub const fn kind(&self) -> SliceKind {
        self.kind
    }

    #[must_use]
    pub fn partition_components(&self) -> &[Value] {
        &self.partition
    }

    #[must_use]
    pub fn partition_components_in(&self) -> Option<&[Value]> {
        self.partition_in.as_deref()
    }

    #[must_use]
    pub const fn clustering(&self) -> &ClusteringFilter {
        &self.clustering
    }

    /// Explicitly requested ordering, if any.
    #[must_use]
    pub const fn ordering(&self) -> Option<OrderingMode> {
        self.ordering
    }

    #[must_use]
    pub const fn bounding(&self) -> BoundingMode {
        self.bounding
    }

    #[must_use]
    pub const fn limit(&self) -> LimitSpec {
        self.limit
    }

    #[must_use]
    pub const fn fetch_size(&self) -> Option<u32> {
        self.fetch_size
    }

    #[must_use]
    pub const fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    #[must_use]
    pub const fn consistency(&self) -> Option<ConsistencyLevel> {
        self.consistency
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[SliceDiagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    const fn entity(&self) -> &'static str {
        self.model.entity_name
    }

    const fn validator(&self) -> KeyValidator<'static> {
        KeyValidator::new(self.model)
    }

    // ------------------------------------------------------------------
    // Partition key
    // ------------------------------------------------------------------

    pub(crate) fn set_partition_components(&mut self, values: Vec<Value>) -> Result<(), SliceError> {
        self.validator().validate_partition_components(&values)?;
        self.partition = values;

        Ok(())
    }

    pub(crate) fn set_partition_components_in(
        &mut self,
        values: Vec<Value>,
    ) -> Result<(), SliceError> {
        if self.partition_in.is_some() {
            return Err(SliceError::DuplicateInClause {
                entity: self.entity(),
                key: KeyKind::Partition,
            });
        }
        self.validator()
            .validate_components_in(KeyKind::Partition, self.partition.len(), &values)?;
        self.partition_in = Some(values);
        self.drop_ordering_if_paged_in();

        Ok(())
    }

    // ------------------------------------------------------------------
    // Clustering filters
    // ------------------------------------------------------------------

    // Clustering filters only follow a fully bound partition key.
    fn require_complete_partition(&self) -> Result<(), SliceError> {
        self.validator()
            .validate_partition_complete(self.partition.len(), self.partition_in.is_some())
    }

    pub(crate) fn set_clusterings(&mut self, values: Vec<Value>) -> Result<(), SliceError> {
        self.require_complete_partition()?;
        self.validator().validate_clustering_components(&values)?;
        self.clustering = ClusteringFilter::Exact {
            values,
            in_values: None,
        };

        Ok(())
    }

    pub(crate) fn set_clusterings_in(&mut self, in_list: Vec<Value>) -> Result<(), SliceError> {
        let (bound, has_in) = match &self.clustering {
            ClusteringFilter::Exact { values, in_values } => (values.len(), in_values.is_some()),
            ClusteringFilter::None | ClusteringFilter::Range { .. } => (0, false),
        };
        if has_in {
            return Err(SliceError::DuplicateInClause {
                entity: self.entity(),
                key: KeyKind::Clustering,
            });
        }
        self.validator()
            .validate_components_in(KeyKind::Clustering, bound, &in_list)?;

        match &mut self.clustering {
            ClusteringFilter::Exact { in_values, .. } => *in_values = Some(in_list),
            other => {
                *other = ClusteringFilter::Exact {
                    values: Vec::new(),
                    in_values: Some(in_list),
                };
            }
        }

        Ok(())
    }

    pub(crate) fn set_from_clusterings(&mut self, values: Vec<Value>) -> Result<(), SliceError> {
        self.require_complete_partition()?;
        self.validator().validate_clustering_components(&values)?;
        match &mut self.clustering {
            ClusteringFilter::Range { from, .. } => *from = Some(values),
            other => {
                *other = ClusteringFilter::Range {
                    from: Some(values),
                    to: None,
                };
            }
        }

        Ok(())
    }

    pub(crate) fn set_to_clusterings(&mut self, values: Vec<Value>) -> Result<(), SliceError> {
        self.require_complete_partition()?;
        self.validator().validate_clustering_components(&values)?;
        match &mut self.clustering {
            ClusteringFilter::Range { to, .. } => *to = Some(values),
            other => {
                *other = ClusteringFilter::Range {
                    from: None,
                    to: Some(values),
                };
            }
        }

        Ok(())
    }

    /// Bound both ends of the range to the same components.
    pub(crate) fn set_matching_range(&mut self, values: Vec<Value>) -> Result<(), SliceError> {
        self.set_from_clusterings(values.clone())?;
        self.set_to_clusterings(values)
    }

    pub(crate) const fn set_bounding(&mut self, bounding: BoundingMode) {
        self.bounding = bounding;
    }

    // ------------------------------------------------------------------
    // Ordering, limit, paging, consistency
    // ------------------------------------------------------------------

    pub(crate) fn set_ordering(&mut self, ordering: OrderingMode) {
        self.ordering = Some(ordering);
        self.ordering_dropped = false;
        self.drop_ordering_if_paged_in();
    }

    pub(crate) const fn set_limit(&mut self, limit: u32) -> Result<(), SliceError> {
        if limit == 0 {
            return Err(SliceError::NonPositiveLimit {
                entity: self.entity(),
            });
        }
        self.limit = LimitSpec::Explicit(limit);

        Ok(())
    }

    /// Override any configured limit; used by single-row terminals.
    pub(crate) const fn force_limit(&mut self, limit: u32) {
        self.limit = LimitSpec::Explicit(limit);
    }

    pub(crate) const fn disable_limit(&mut self) {
        self.limit = LimitSpec::Disabled;
    }

    pub(crate) fn set_fetch_size(&mut self, fetch_size: u32) -> Result<(), SliceError> {
        if fetch_size == 0 {
            return Err(SliceError::NonPositiveFetchSize {
                entity: self.entity(),
            });
        }
        self.fetch_size = Some(fetch_size);
        self.drop_ordering_if_paged_in();

        Ok(())
    }

    pub(crate) const fn set_consistency(&mut self, consistency: ConsistencyLevel) {
        self.consistency = Some(consistency);
    }

    pub(crate) fn push_listener(&mut self, listener: AsyncListener) {
        self.listeners.push(listener);
    }

    pub(crate) fn take_listeners(&mut self) -> Vec<AsyncListener> {
        std::mem::take(&mut self.listeners)
    }

    /// Apply a root-level matching shortcut.
    ///
    /// Shortcuts define their own limit and ordering, so an explicit caller
    /// choice for either is a usage error rather than something to override.
    pub(crate) fn apply_matching_shortcut(
        &mut self,
        shortcut: MatchingShortcut,
        keys: Vec<Value>,
    ) -> Result<(), SliceError> {
        let conflict = |field| SliceError::ShortcutConflict {
            entity: self.entity(),
            shortcut: shortcut.name(),
            field,
        };
        if self.limit != self.kind.initial_limit() {
            return Err(conflict("limit"));
        }
        if self.ordering.is_some() || self.ordering_dropped {
            return Err(conflict("ordering"));
        }

        self.set_matching_range(keys)?;
        match shortcut {
            MatchingShortcut::First { limit } => self.set_limit(limit)?,
            MatchingShortcut::Last { limit } => {
                self.set_limit(limit)?;
                self.set_ordering(OrderingMode::Descending);
            }
            MatchingShortcut::One => self.force_limit(1),
        }

        Ok(())
    }

    // A store cannot page over a partition IN list while honoring ORDER BY:
    // keep the paging, drop the ordering, and leave a trace of it.
    fn drop_ordering_if_paged_in(&mut self) {
        if !self.is_paged_in() || self.ordering.is_none() {
            return;
        }
        self.ordering = None;
        self.ordering_dropped = true;

        let diagnostic = SliceDiagnostic::OrderingDroppedForPagedIn {
            entity: self.entity(),
        };
        if self.diagnostics.contains(&diagnostic) {
            return;
        }
        tracing::warn!(
            entity = self.entity(),
            fetch_size = self.fetch_size,
            "{diagnostic}"
        );
        self.diagnostics.push(diagnostic);
    }

    const fn is_paged_in(&self) -> bool {
        self.fetch_size.is_some() && self.partition_in.is_some()
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Resolve the descriptor into an executor-ready slice.
    ///
    /// Pure with respect to the descriptor: resolving twice yields equal slices.
    pub fn resolve(&self) -> Result<ResolvedSlice, SliceError> {
        self.validator()
            .validate_partition_complete(self.partition.len(), self.partition_in.is_some())?;

        let slice = ResolvedSlice {
            entity: self.entity(),
            kind: self.kind,
            partition: self.resolve_partition(),
            clustering: self.resolve_clustering(),
            ordering: self.resolve_ordering(),
            limit: match self.limit {
                LimitSpec::Default => Some(self.default_limit),
                LimitSpec::Explicit(limit) => Some(limit),
                LimitSpec::Disabled => None,
            },
            fetch_size: self.fetch_size,
            consistency: self.consistency.unwrap_or(self.default_consistency),
            diagnostics: self.diagnostics.clone(),
        };

        tracing::debug!(
            entity = slice.entity,
            kind = %slice.kind,
            limit = slice.limit,
            fetch_size = slice.fetch_size,
            "resolved slice descriptor"
        );

        Ok(slice)
    }

    fn resolve_partition(&self) -> Vec<Restriction> {
        let names = self.model.partition_key_names(self.model.partition_arity());
        let mut restrictions: Vec<Restriction> = names
            .iter()
            .copied()
            .zip(&self.partition)
            .map(|(column, value)| Restriction::Eq {
                column,
                value: value.clone(),
            })
            .collect();

        if let Some(values) = &self.partition_in
            && let Some(&column) = names.get(self.partition.len())
        {
            restrictions.push(Restriction::In {
                column,
                values: values.clone(),
            });
        }

        restrictions
    }

    fn resolve_clustering(&self) -> Vec<Restriction> {
        let arity = self.model.clustering_arity();
        let names = self.model.clustering_key_names(arity);

        match &self.clustering {
            ClusteringFilter::None => Vec::new(),
            ClusteringFilter::Exact { values, in_values } => {
                let mut restrictions: Vec<Restriction> = names
                    .iter()
                    .copied()
                    .zip(values)
                    .map(|(column, value)| Restriction::Eq {
                        column,
                        value: value.clone(),
                    })
                    .collect();

                if let Some(in_values) = in_values
                    && let Some(&column) = names.get(values.len())
                {
                    restrictions.push(Restriction::In {
                        column,
                        values: in_values.clone(),
                    });
                }

                restrictions
            }
            ClusteringFilter::Range { from, to } => {
                let physical = self
                    .model
                    .leading_clustering()
                    .map(|field| field.order)
                    .unwrap_or_default();
                let ops = self.bounding.resolve(physical);

                [(from, ops.from), (to, ops.to)]
                    .into_iter()
                    .filter_map(|(values, op)| values.as_ref().map(|values| (values, op)))
                    .map(|(values, op)| slice_restriction(&names, values, op))
                    .collect()
            }
        }
    }

    // Paging over a partition IN list never carries an ordering, not even
    // the implicit ascending default.
    fn resolve_ordering(&self) -> Option<ResolvedOrdering> {
        if self.ordering_dropped || self.is_paged_in() || self.kind == SliceKind::Delete {
            return None;
        }

        let leading = self.model.leading_clustering()?;
        let requested = self.ordering.unwrap_or_default();

        Some(ResolvedOrdering {
            column: leading.name,
            requested,
            effective: requested.resolve(leading.order),
            explicit: self.ordering.is_some(),
        })
    }
}

impl fmt::Debug for SliceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceDescriptor")
            .field("entity", &self.model.entity_name)
            .field("kind", &self.kind)
            .field("partition", &self.partition)
            .field("partition_in", &self.partition_in)
            .field("clustering", &self.clustering)
            .field("ordering", &self.ordering)
            .field("ordering_dropped", &self.ordering_dropped)
            .field("bounding", &self.bounding)
            .field("limit", &self.limit)
            .field("fetch_size", &self.fetch_size)
            .field("consistency", &self.consistency)
            .field("listeners", &self.listeners.len())
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

fn slice_restriction(names: &[&'static str], values: &[Value], op: CompareOp) -> Restriction {
    Restriction::Slice {
        columns: names.iter().take(values.len()).copied().collect(),
        op,
        values: values.to_vec(),
    }
}
