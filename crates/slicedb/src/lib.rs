//! ## Crate layout
//! - `core`: values, entity models, the staged slice builder, executor
//!   contracts, and the in-memory reference store.
//! - `error`: the public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module carries what application code needs to declare
//! entities and run slices against a session.

pub use slicedb_core as core;

pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use slicedb_core::slice_values;
pub use error::Error;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        core::{
            config::SliceConfig,
            db::{
                self, ConsistencyLevel, Response, SliceSession,
                executor::{AsyncSliceExecutor as _, SliceExecutor as _},
                query::{BoundingMode, OrderingMode},
                store::MemoryStore,
            },
            model::{
                entity::EntityModel,
                field::{ClusteringFieldModel, ClusteringOrder, FieldKind, KeyFieldModel},
            },
            traits::{EntityKind, EntityValue, Path},
            value::Value,
        },
        error::Error,
        slice_values,
    };
}
