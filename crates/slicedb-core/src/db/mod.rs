//! Slice queries: descriptor construction, staged builders, and the
//! executor contracts they resolve into.

pub mod consistency;
pub mod executor;
pub mod query;
pub mod response;
pub mod row;
pub mod session;
pub mod store;

pub use consistency::ConsistencyLevel;
pub use response::{Response, ResponseError};
pub use session::{AsyncEntitySlices, EntitySlices, SliceSession};
