use crate::{
    db::{response::ResponseError, row::RowDecodeError},
    error::InternalError,
    model::{entity::KeyKind, field::FieldKind},
    value::ValueKind,
};
use thiserror::Error as ThisError;

///
/// QueryError
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("{0}")]
    Validate(#[from] SliceError),

    #[error("{0}")]
    Execute(#[from] InternalError),

    #[error("{0}")]
    Response(#[from] ResponseError),
}

impl From<RowDecodeError> for QueryError {
    fn from(err: RowDecodeError) -> Self {
        Self::Execute(err.into())
    }
}

///
/// SliceError
///
/// Local validation failures raised while a slice descriptor is built.
/// Every variant names the entity and, where one is involved, the field.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SliceError {
    #[error("{key} components for entity '{entity}' must not be empty")]
    EmptyComponents { entity: &'static str, key: KeyKind },

    #[error("entity '{entity}' accepts at most {max} {key} component(s), found {found}")]
    TooManyComponents {
        entity: &'static str,
        key: KeyKind,
        max: usize,
        found: usize,
    },

    #[error("{key} component '{field}' of entity '{entity}' must not be null")]
    NullComponent {
        entity: &'static str,
        key: KeyKind,
        field: &'static str,
    },

    #[error("{key} component '{field}' of entity '{entity}' expects {expected}, found {found}")]
    ComponentKindMismatch {
        entity: &'static str,
        key: KeyKind,
        field: &'static str,
        expected: FieldKind,
        found: ValueKind,
    },

    #[error(
        "IN clause on the {key} key of entity '{entity}' requires exactly {required} preceding component(s), found {found}"
    )]
    InPrefixIncomplete {
        entity: &'static str,
        key: KeyKind,
        required: usize,
        found: usize,
    },

    #[error("IN clause on {key} component '{field}' of entity '{entity}' must list at least one value")]
    EmptyInValues {
        entity: &'static str,
        key: KeyKind,
        field: &'static str,
    },

    #[error("IN clause on the {key} key of entity '{entity}' is already set")]
    DuplicateInClause { entity: &'static str, key: KeyKind },

    #[error("partition key of entity '{entity}' requires {required} component(s), found {found}")]
    IncompletePartitionKey {
        entity: &'static str,
        required: usize,
        found: usize,
    },

    #[error("limit for entity '{entity}' must be strictly positive")]
    NonPositiveLimit { entity: &'static str },

    #[error("fetch size for entity '{entity}' must be strictly positive")]
    NonPositiveFetchSize { entity: &'static str },

    #[error("{shortcut}() on entity '{entity}' cannot be combined with an explicit {field}")]
    ShortcutConflict {
        entity: &'static str,
        shortcut: &'static str,
        field: &'static str,
    },
}
