use crate::{
    db::row::{Row, RowDecodeError},
    model::entity::EntityModel,
};

// ============================================================================
// ENTITY IDENTITY & SCHEMA
// ============================================================================
//
// These traits describe *what an entity is*, not how it is stored
// or manipulated at runtime.
//

///
/// Path
/// Fully-qualified schema path.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// EntityKind
///
/// Entity with a declared partition/clustering key shape.
/// This is all the slice builder needs; row mapping lives on `EntityValue`.
///

pub trait EntityKind: Path + 'static {
    const MODEL: &'static EntityModel;
}

// ============================================================================
// ENTITY VALUES
// ============================================================================

///
/// EntityValue
///
/// A concrete entity that executors can materialize from, and write to, rows.
/// The column mapping itself is owned by the implementor.
///

pub trait EntityValue: EntityKind + Send + Sized {
    fn to_row(&self) -> Row;

    fn from_row(row: &Row) -> Result<Self, RowDecodeError>;
}
