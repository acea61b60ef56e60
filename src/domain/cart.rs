use serde::{Deserialize, Serialize};

use super::MenuItem;

/// A menu item in the cart. Quantity is at least 1 while the entry exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
}

/// Requested quantity for an existing cart entry. Zero or below removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItemPatch {
    pub quantity: i64,
}

impl CartItem {
    /// A fresh entry with quantity 1.
    pub fn new(item: MenuItem) -> Self {
        Self { item, quantity: 1 }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    /// Price of this line: unit price times quantity, saturating at `u64::MAX`.
    pub fn line_total(&self) -> u64 {
        self.item.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Sum of `price * quantity` over every entry; 0 for an empty cart.
pub fn subtotal(items: &[CartItem]) -> u64 {
    items
        .iter()
        .fold(0u64, |sum, item| sum.saturating_add(item.line_total()))
}

/// Total number of units in the cart.
pub fn item_count(items: &[CartItem]) -> u64 {
    items
        .iter()
        .fold(0u64, |count, item| count.saturating_add(u64::from(item.quantity)))
}
