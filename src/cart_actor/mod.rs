//! Cart-specific entity rules: merge on add, remove at zero quantity.

pub mod entity;
pub mod error;

pub use error::*;
