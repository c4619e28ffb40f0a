//! Core runtime for slicedb: key values, entity models, the staged slice
//! builder, executor contracts, and the in-memory reference store.
#![warn(unreachable_pub)]

#[macro_use]
mod macros;

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Vocabulary needed to declare entities and build slices.
/// Executors, stores, and error types stay one module level down.
///

pub mod prelude {
    pub use crate::{
        config::SliceConfig,
        db::{
            ConsistencyLevel, SliceSession,
            query::{BoundingMode, OrderingMode},
        },
        model::{
            entity::EntityModel,
            field::{ClusteringFieldModel, ClusteringOrder, FieldKind, KeyFieldModel},
        },
        slice_values,
        traits::{EntityKind, EntityValue, Path},
        value::Value,
    };
}
