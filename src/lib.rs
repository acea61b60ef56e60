//! Storefront core: catalog, cart, checkout and simulated order tracking over
//! a persisted key-value store, with each record owned by one actor.

pub mod actor_framework;
pub mod app_system;
pub mod cart_actor;
pub mod catalog_actor;
pub mod clients;
pub mod domain;
pub mod notify;
pub mod order_actor;
pub mod search;
pub mod seed;
pub mod storage;
pub mod tracking;

#[cfg(test)]
mod mock_framework;
