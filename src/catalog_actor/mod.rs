//! Restaurant and menu reference data.

pub mod entity;
pub mod error;

pub use error::*;
