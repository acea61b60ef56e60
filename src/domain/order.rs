use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CartItem, PricingPolicy};

/// Delivery progress of an order. Moves strictly forward, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Placed,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Placed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    /// Position in the fixed sequence, starting at 0 for `Placed`.
    pub fn index(&self) -> usize {
        match self {
            OrderStatus::Placed => 0,
            OrderStatus::Preparing => 1,
            OrderStatus::OutForDelivery => 2,
            OrderStatus::Delivered => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "Order Placed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// The following status, or `None` once delivered.
    pub fn next(&self) -> Option<OrderStatus> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wire = match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
        };
        f.write_str(wire)
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Cod,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI Payment",
            PaymentMethod::Cod => "Cash on Delivery",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Upi => f.write_str("upi"),
            PaymentMethod::Cod => f.write_str("cod"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upi" => Ok(PaymentMethod::Upi),
            "cod" => Ok(PaymentMethod::Cod),
            other => Err(format!("Unknown payment method: {}", other)),
        }
    }
}

/// Where an order is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub name: String,
    pub phone: String,
    pub street: String,
    #[serde(rename = "pin")]
    pub postal_code: String,
}

impl DeliveryAddress {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        street: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            street: street.into(),
            postal_code: postal_code.into(),
        }
    }

    /// Names of the fields left blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("phone", &self.phone),
            ("street", &self.street),
            ("pin", &self.postal_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// A completed checkout. Everything except `status` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Creation time in milliseconds since the Unix epoch, as decimal text.
    pub id: String,
    pub items: Vec<CartItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub address: DeliveryAddress,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

/// Payload for placing a new order from a cart snapshot.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub items: Vec<CartItem>,
    pub address: DeliveryAddress,
    pub payment_method: PaymentMethod,
    pub pricing: PricingPolicy,
}

/// One row of the tracking view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStep {
    pub status: OrderStatus,
    pub complete: bool,
    pub current: bool,
}

impl Order {
    /// Every status in sequence, marked complete up to and including the
    /// current one.
    pub fn progress(&self) -> Vec<StatusStep> {
        OrderStatus::ALL
            .iter()
            .map(|step| StatusStep {
                status: *step,
                complete: step.index() <= self.status.index(),
                current: *step == self.status,
            })
            .collect()
    }
}
