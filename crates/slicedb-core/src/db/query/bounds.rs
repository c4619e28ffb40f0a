//! Bounding and ordering resolution.
//!
//! Both resolvers are pure lookups keyed by the physical order of the
//! leading clustering column. "From" always means the end of the range the
//! storage order reaches first, so a descending column mirrors every
//! operator.

#[cfg(test)]
mod tests;

use crate::model::field::ClusteringOrder;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// OrderingMode
/// Caller-requested logical direction of result iteration.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum OrderingMode {
    #[default]
    #[display("ASC")]
    Ascending,
    #[display("DESC")]
    Descending,
}

impl OrderingMode {
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Resolve the requested mode into a direction relative to storage order.
    ///
    /// `Ascending` in the result walks storage forward. On a descending
    /// column the requested mode is flipped, so a caller asking for ascending
    /// values gets a reverse storage walk.
    #[must_use]
    pub const fn resolve(self, physical: ClusteringOrder) -> Self {
        match physical {
            ClusteringOrder::Asc => self,
            ClusteringOrder::Desc => self.reverse(),
        }
    }
}

///
/// BoundingMode
///
/// Inclusivity of the two ends of a clustering range.
/// Each variant is a fixed `(inclusive_start, inclusive_end)` pair.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum BoundingMode {
    #[default]
    #[display("inclusive bounds")]
    InclusiveBounds,
    #[display("exclusive bounds")]
    ExclusiveBounds,
    #[display("inclusive start bound only")]
    InclusiveStartBoundOnly,
    #[display("inclusive end bound only")]
    InclusiveEndBoundOnly,
}

impl BoundingMode {
    pub const ALL: [Self; 4] = [
        Self::InclusiveBounds,
        Self::ExclusiveBounds,
        Self::InclusiveStartBoundOnly,
        Self::InclusiveEndBoundOnly,
    ];

    #[must_use]
    pub const fn inclusive_start(self) -> bool {
        matches!(self, Self::InclusiveBounds | Self::InclusiveStartBoundOnly)
    }

    #[must_use]
    pub const fn inclusive_end(self) -> bool {
        matches!(self, Self::InclusiveBounds | Self::InclusiveEndBoundOnly)
    }

    /// Resolve the operator pair for a range on a column of the given order.
    #[must_use]
    pub const fn resolve(self, physical: ClusteringOrder) -> BoundOperators {
        BoundOperators {
            from: from_operator(physical, self.inclusive_start()),
            to: to_operator(physical, self.inclusive_end()),
        }
    }
}

///
/// CompareOp
/// Comparison operator carried by a resolved restriction.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum CompareOp {
    #[display("=")]
    Eq,
    #[display("<")]
    Lt,
    #[display("<=")]
    Lte,
    #[display(">")]
    Gt,
    #[display(">=")]
    Gte,
    #[display("IN")]
    In,
}

impl CompareOp {
    /// Return true when `ordering` (stored value vs bound) satisfies this operator.
    #[must_use]
    pub const fn matches(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq | Self::In => matches!(ordering, Ordering::Equal),
            Self::Lt => matches!(ordering, Ordering::Less),
            Self::Lte => !matches!(ordering, Ordering::Greater),
            Self::Gt => matches!(ordering, Ordering::Greater),
            Self::Gte => !matches!(ordering, Ordering::Less),
        }
    }
}

///
/// BoundOperators
/// Resolved operators for the from-clause and to-clause of one range.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BoundOperators {
    pub from: CompareOp,
    pub to: CompareOp,
}

const fn from_operator(physical: ClusteringOrder, inclusive: bool) -> CompareOp {
    match (physical, inclusive) {
        (ClusteringOrder::Asc, true) => CompareOp::Gte,
        (ClusteringOrder::Asc, false) => CompareOp::Gt,
        (ClusteringOrder::Desc, true) => CompareOp::Lte,
        (ClusteringOrder::Desc, false) => CompareOp::Lt,
    }
}

const fn to_operator(physical: ClusteringOrder, inclusive: bool) -> CompareOp {
    match (physical, inclusive) {
        (ClusteringOrder::Asc, true) => CompareOp::Lte,
        (ClusteringOrder::Asc, false) => CompareOp::Lt,
        (ClusteringOrder::Desc, true) => CompareOp::Gte,
        (ClusteringOrder::Desc, false) => CompareOp::Gt,
    }
}
