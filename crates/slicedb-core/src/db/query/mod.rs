pub mod bounds;
pub mod builder;
pub mod descriptor;
pub mod error;
pub mod validate;

pub use bounds::{BoundingMode, CompareOp, OrderingMode};
pub use builder::SliceQuery;
pub use descriptor::{ResolvedSlice, Restriction, SliceDescriptor, SliceKind};
pub use error::{QueryError, SliceError};
