//! Entity key metadata consumed by validation, resolution, and executors.

pub mod entity;
pub mod field;
