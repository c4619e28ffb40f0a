use crate::value::{Value, ValueKind};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// FieldKind
///
/// Declared column type of a key field.
/// Narrower than `ValueKind`: `Null` is never a valid key type.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum FieldKind {
    #[display("bool")]
    Bool,
    #[display("int")]
    Int,
    #[display("uint")]
    Uint,
    #[display("float")]
    Float,
    #[display("text")]
    Text,
    #[display("blob")]
    Blob,
    #[display("timestamp")]
    Timestamp,
}

impl FieldKind {
    /// Return true when `value` can be bound to a field of this kind.
    #[must_use]
    pub const fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value.kind()),
            (Self::Bool, ValueKind::Bool)
                | (Self::Int, ValueKind::Int)
                | (Self::Uint, ValueKind::Uint)
                | (Self::Float, ValueKind::Float)
                | (Self::Text, ValueKind::Text)
                | (Self::Blob, ValueKind::Blob)
                | (Self::Timestamp, ValueKind::Timestamp)
        )
    }
}

///
/// ClusteringOrder
///
/// Physical sort direction of a clustering column, fixed at schema time.
/// Independent of the direction a caller requests at query time.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum ClusteringOrder {
    #[default]
    #[display("ASC")]
    Asc,
    #[display("DESC")]
    Desc,
}

impl ClusteringOrder {
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::Desc)
    }
}

///
/// KeyFieldModel
/// Partition key component metadata.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyFieldModel {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl KeyFieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

///
/// ClusteringFieldModel
/// Clustering column metadata, including its physical direction.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClusteringFieldModel {
    pub name: &'static str,
    pub kind: FieldKind,
    pub order: ClusteringOrder,
}

impl ClusteringFieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind, order: ClusteringOrder) -> Self {
        Self { name, kind, order }
    }

    #[must_use]
    pub const fn asc(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, ClusteringOrder::Asc)
    }

    #[must_use]
    pub const fn desc(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, ClusteringOrder::Desc)
    }
}
