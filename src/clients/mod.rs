//! Typed clients over the resource actors. Orchestration that spans more
//! than one record (checkout, seeding) lives here, not in the actors.

#[macro_use]
mod macros;

mod cart_client;
mod catalog_client;
mod order_client;

pub use cart_client::CartClient;
pub use catalog_client::CatalogClient;
pub use order_client::OrderClient;
