use chrono::{DateTime, Utc};

use crate::actor_framework::{Entity, Retain};
use crate::domain::{Order, OrderCreate, OrderStatus};
use crate::storage::RecordKey;

use super::actions::OrderAction;

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = OrderStatus;

    const RECORD: RecordKey = RecordKey::Orders;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Order from a cart snapshot.
    ///
    /// # Arguments
    /// * `id` - Creation time in epoch milliseconds; also becomes `created_at`
    /// * `params` - Items, address, payment method and the pricing to total them with
    ///
    /// # Notes
    /// The order is initialized with status `Placed`. An empty snapshot is refused.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        if params.items.is_empty() {
            return Err("Cannot place an order without items".to_string());
        }

        let created_at = id
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or_else(|| format!("Order id is not a timestamp: {}", id))?;

        let total = params.pricing.bill(&params.items).total;

        Ok(Self {
            id,
            items: params.items,
            total,
            status: OrderStatus::Placed,
            address: params.address,
            payment_method: params.payment_method,
            created_at,
        })
    }

    /// Orders are immutable apart from their status.
    fn on_update(&mut self, _patch: ()) -> Result<Retain, String> {
        Err(format!("Order {} cannot be modified", self.id))
    }

    fn on_delete(&self) -> Result<(), String> {
        Err(format!("Order {} cannot be deleted", self.id))
    }

    /// Handles order-specific actions.
    ///
    /// # Actions
    /// - `AdvanceStatus`: moves one step along the status sequence; a
    ///   delivered order stays delivered
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderStatus, String> {
        match action {
            OrderAction::AdvanceStatus => {
                if let Some(next) = self.status.next() {
                    self.status = next;
                }
                Ok(self.status)
            }
        }
    }
}
