use crate::model::field::{ClusteringFieldModel, ClusteringOrder, FieldKind, KeyFieldModel};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// KeyKind
/// Names which half of the primary key a component belongs to.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum KeyKind {
    #[display("partition")]
    Partition,
    #[display("clustering")]
    Clustering,
}

///
/// KeyField
/// Position-independent view of one key column.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyField {
    pub name: &'static str,
    pub kind: FieldKind,
}

///
/// EntityModel
///
/// Read-only key shape of one entity, resolved once per entity type.
/// Column order in both key slices is significant.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified Rust type path (for diagnostics).
    pub path: &'static str,
    /// Stable table name used by executors.
    pub entity_name: &'static str,
    /// Ordered partition key components.
    pub partition_key: &'static [KeyFieldModel],
    /// Ordered clustering columns.
    pub clustering_key: &'static [ClusteringFieldModel],
}

impl EntityModel {
    #[must_use]
    pub const fn new(
        path: &'static str,
        entity_name: &'static str,
        partition_key: &'static [KeyFieldModel],
        clustering_key: &'static [ClusteringFieldModel],
    ) -> Self {
        Self {
            path,
            entity_name,
            partition_key,
            clustering_key,
        }
    }

    #[must_use]
    pub const fn partition_arity(&self) -> usize {
        self.partition_key.len()
    }

    #[must_use]
    pub const fn clustering_arity(&self) -> usize {
        self.clustering_key.len()
    }

    #[must_use]
    pub const fn key_arity(&self, key: KeyKind) -> usize {
        match key {
            KeyKind::Partition => self.partition_arity(),
            KeyKind::Clustering => self.clustering_arity(),
        }
    }

    /// Return the key column at `position`, if the key is that wide.
    #[must_use]
    pub fn key_field(&self, key: KeyKind, position: usize) -> Option<KeyField> {
        match key {
            KeyKind::Partition => self.partition_key.get(position).map(|f| KeyField {
                name: f.name,
                kind: f.kind,
            }),
            KeyKind::Clustering => self.clustering_key.get(position).map(|f| KeyField {
                name: f.name,
                kind: f.kind,
            }),
        }
    }

    /// First `count` partition key names, clamped to the key arity.
    #[must_use]
    pub fn partition_key_names(&self, count: usize) -> Vec<&'static str> {
        self.partition_key.iter().take(count).map(|f| f.name).collect()
    }

    /// First `count` clustering column names, clamped to the key arity.
    #[must_use]
    pub fn clustering_key_names(&self, count: usize) -> Vec<&'static str> {
        self.clustering_key.iter().take(count).map(|f| f.name).collect()
    }

    /// Physical direction of every clustering column, in key order.
    #[must_use]
    pub fn clustering_order(&self) -> Vec<ClusteringOrder> {
        self.clustering_key.iter().map(|f| f.order).collect()
    }

    /// The clustering column that drives in-partition iteration order.
    #[must_use]
    pub const fn leading_clustering(&self) -> Option<&'static ClusteringFieldModel> {
        self.clustering_key.first()
    }
}
