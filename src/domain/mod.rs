//! Business domain types. Pure data and pure functions, no actor concerns.

pub mod cart;
pub mod order;
pub mod pricing;
pub mod restaurant;

pub use cart::{CartItem, CartItemPatch};
pub use order::*;
pub use pricing::*;
pub use restaurant::*;
