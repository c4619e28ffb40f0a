use crate::value::{Value, ValueKind};
use derive_more::{Deref, IntoIterator};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// RowDecodeError
/// Failures raised while mapping a stored row back into an entity.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RowDecodeError {
    #[error("row is missing column '{column}'")]
    MissingColumn { column: String },

    #[error("column '{column}' expected {expected}, found {found}")]
    KindMismatch {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

///
/// Row
///
/// Column name → value map exchanged with executors.
/// Column iteration order is lexical, never declaration order.
///

#[derive(Clone, Debug, Default, Deref, IntoIterator, PartialEq)]
pub struct Row(BTreeMap<String, Value>);

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    /// Return the value of `column`, failing when the row does not carry it.
    pub fn require(&self, column: &str) -> Result<&Value, RowDecodeError> {
        self.0.get(column).ok_or_else(|| RowDecodeError::MissingColumn {
            column: column.to_string(),
        })
    }

    pub fn int(&self, column: &str) -> Result<i64, RowDecodeError> {
        match self.require(column)? {
            Value::Int(v) => Ok(*v),
            other => Err(mismatch(column, ValueKind::Int, other)),
        }
    }

    pub fn uint(&self, column: &str) -> Result<u64, RowDecodeError> {
        match self.require(column)? {
            Value::Uint(v) => Ok(*v),
            other => Err(mismatch(column, ValueKind::Uint, other)),
        }
    }

    pub fn float(&self, column: &str) -> Result<f64, RowDecodeError> {
        match self.require(column)? {
            Value::Float(v) => Ok(*v),
            other => Err(mismatch(column, ValueKind::Float, other)),
        }
    }

    pub fn bool(&self, column: &str) -> Result<bool, RowDecodeError> {
        match self.require(column)? {
            Value::Bool(v) => Ok(*v),
            other => Err(mismatch(column, ValueKind::Bool, other)),
        }
    }

    pub fn text(&self, column: &str) -> Result<&str, RowDecodeError> {
        match self.require(column)? {
            Value::Text(v) => Ok(v),
            other => Err(mismatch(column, ValueKind::Text, other)),
        }
    }

    pub fn timestamp(&self, column: &str) -> Result<i64, RowDecodeError> {
        match self.require(column)? {
            Value::Timestamp(v) => Ok(*v),
            other => Err(mismatch(column, ValueKind::Timestamp, other)),
        }
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn mismatch(column: &str, expected: ValueKind, found: &Value) -> RowDecodeError {
    RowDecodeError::KindMismatch {
        column: column.to_string(),
        expected,
        found: found.kind(),
    }
}
