//! System orchestration, startup, and shutdown logic.

pub mod config;
pub mod observers;
pub mod storefront_system;
pub mod telemetry;

pub use config::*;
pub use observers::*;
pub use storefront_system::*;
pub use telemetry::*;
