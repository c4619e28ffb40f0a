use crate::{
    db::{
        consistency::ConsistencyLevel,
        query::{
            bounds::{CompareOp, OrderingMode},
            descriptor::{SliceDiagnostic, SliceKind},
        },
    },
    value::Value,
};
use serde::Serialize;
use std::fmt::{self, Write as _};

///
/// Restriction
///
/// One concrete predicate over key columns.
/// `Slice` compares the listed columns as a tuple, so a multi-column range
/// bound keeps lexicographic key order.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Restriction {
    Eq {
        column: &'static str,
        value: Value,
    },
    In {
        column: &'static str,
        values: Vec<Value>,
    },
    Slice {
        columns: Vec<&'static str>,
        op: CompareOp,
        values: Vec<Value>,
    },
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq { column, value } => write!(f, "{column} = {value}"),
            Self::In { column, values } => write!(f, "{column} IN ({})", join(values)),
            Self::Slice {
                columns,
                op,
                values,
            } => {
                if let ([column], [value]) = (columns.as_slice(), values.as_slice()) {
                    write!(f, "{column} {op} {value}")
                } else {
                    write!(f, "({}) {op} ({})", columns.join(", "), join(values))
                }
            }
        }
    }
}

///
/// ResolvedOrdering
///
/// `requested` is what the caller asked for; `effective` is the same intent
/// expressed relative to storage order of `column`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ResolvedOrdering {
    pub column: &'static str,
    pub requested: OrderingMode,
    pub effective: OrderingMode,
    pub explicit: bool,
}

///
/// ResolvedSlice
///
/// Immutable, executor-ready description of one slice statement.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedSlice {
    pub entity: &'static str,
    pub kind: SliceKind,
    pub partition: Vec<Restriction>,
    pub clustering: Vec<Restriction>,
    pub ordering: Option<ResolvedOrdering>,
    pub limit: Option<u32>,
    pub fetch_size: Option<u32>,
    pub consistency: ConsistencyLevel,
    pub diagnostics: Vec<SliceDiagnostic>,
}

impl ResolvedSlice {
    /// All restrictions in statement order, partition first.
    pub fn restrictions(&self) -> impl Iterator<Item = &Restriction> {
        self.partition.iter().chain(&self.clustering)
    }

    /// Find the single-column slice restriction using `op`, if any.
    #[must_use]
    pub fn slice_bound(&self, op: CompareOp) -> Option<&Restriction> {
        self.clustering
            .iter()
            .find(|r| {
                matches!(
                    r,
                    Restriction::Slice { columns, op: found, .. }
                        if *found == op && columns.len() == 1
                )
            })
    }

    #[must_use]
    pub const fn is_paged(&self) -> bool {
        self.fetch_size.is_some()
    }
}

impl fmt::Display for ResolvedSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} FROM {} WHERE ", self.kind, self.entity)?;

        let mut predicate = String::new();
        for (i, restriction) in self.restrictions().enumerate() {
            if i > 0 {
                predicate.push_str(" AND ");
            }
            write!(predicate, "{restriction}")?;
        }
        f.write_str(&predicate)?;

        if let Some(ordering) = &self.ordering {
            write!(f, " ORDER BY {} {}", ordering.column, ordering.requested)?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(fetch_size) = self.fetch_size {
            write!(f, " FETCH {fetch_size}")?;
        }

        write!(f, " CONSISTENCY {}", self.consistency)
    }
}

fn join(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
