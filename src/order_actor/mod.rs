//! Order-specific domain logic: creation from a cart snapshot and the
//! status sequence.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
