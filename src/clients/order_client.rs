use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::clients::CartClient;
use crate::domain::{CartItem, DeliveryAddress, Order, OrderCreate, OrderStatus, PaymentMethod};
use crate::order_actor::{OrderAction, OrderError};
use crate::tracking::{StatusTracker, TrackingHandle};

/// Client for interacting with the Order actor.
///
/// Checkout is orchestrated here: the cart is read through the cart client,
/// the order is placed, and only then is the cart cleared.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    cart_client: CartClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, cart_client: CartClient) -> Self {
        Self { inner, cart_client }
    }

    /// Appends a new order built from `items`. The caller is responsible for
    /// clearing the cart afterwards.
    #[instrument(skip(self, items, address), fields(lines = items.len()))]
    pub async fn place_order(
        &self,
        items: Vec<CartItem>,
        address: DeliveryAddress,
        payment_method: PaymentMethod,
    ) -> Result<String, OrderError> {
        if items.is_empty() {
            warn!("Refusing to place an empty order");
            return Err(OrderError::EmptyCart);
        }

        let payload = OrderCreate {
            items,
            address,
            payment_method,
            pricing: self.cart_client.pricing(),
        };

        let order_id = self.inner.create(payload).await?;
        info!(order_id = %order_id, "Order placed");
        Ok(order_id)
    }

    /// Places an order for the current cart contents and empties the cart.
    #[instrument(skip(self, address))]
    pub async fn checkout(
        &self,
        address: DeliveryAddress,
        payment_method: &str,
    ) -> Result<String, OrderError> {
        info!("Processing checkout (Client Side)");

        // Step 1: Snapshot the cart
        let snapshot = self.cart_client.list_cart_items().await?;
        if snapshot.is_empty() {
            warn!("Checkout with an empty cart");
            return Err(OrderError::EmptyCart);
        }

        // Step 2: Validate delivery details
        let missing = address.missing_fields();
        if !missing.is_empty() {
            warn!(?missing, "Checkout with incomplete address");
            return Err(OrderError::MissingInformation(
                missing.into_iter().map(str::to_string).collect(),
            ));
        }
        let payment_method: PaymentMethod = payment_method.parse().map_err(|e: String| {
            warn!(error = %e, "Checkout with unknown payment method");
            OrderError::ValidationError(e)
        })?;

        // Step 3: Place the order
        let order_id = self.place_order(snapshot, address, payment_method).await?;

        // Step 4: Clear the cart
        if let Err(e) = self.cart_client.clear().await {
            error!(order_id = %order_id, error = %e, "Order placed but cart could not be cleared");
            return Err(e.into());
        }

        Ok(order_id)
    }

    /// Moves an order one status step forward and returns the new status.
    #[instrument(skip(self))]
    pub async fn advance_status(&self, order_id: String) -> Result<OrderStatus, OrderError> {
        let status = self
            .inner
            .perform_action(order_id, OrderAction::AdvanceStatus)
            .await?;
        info!(%status, "Order status advanced");
        Ok(status)
    }

    /// Starts the simulated status progression for an order. Dropping the
    /// returned handle stops it.
    pub fn track(&self, order_id: String, period: Duration) -> TrackingHandle {
        StatusTracker::start(self.clone(), order_id, period)
    }
}

impl_client_methods!(OrderClient, inner: Order, OrderError, order, orders);
