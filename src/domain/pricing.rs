use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{cart, CartItem};

/// Flat delivery fee and tax rate applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub delivery_fee: Decimal,
    pub tax_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            delivery_fee: Decimal::from(40),
            // 5%
            tax_rate: Decimal::new(5, 2),
        }
    }
}

/// Price breakdown of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub taxes: Decimal,
    pub total: Decimal,
}

impl PricingPolicy {
    /// Computes `subtotal + delivery_fee + round(subtotal * tax_rate, 2)`.
    /// The delivery fee only applies to a non-empty cart.
    pub fn bill(&self, items: &[CartItem]) -> Bill {
        let subtotal = Decimal::from(cart::subtotal(items));
        let delivery_fee = if items.is_empty() {
            Decimal::ZERO
        } else {
            self.delivery_fee
        };
        let taxes = (subtotal * self.tax_rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Bill {
            subtotal,
            delivery_fee,
            taxes,
            total: subtotal + delivery_fee + taxes,
        }
    }
}
