use tracing::{debug, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::cart_actor::CartError;
use crate::domain::{cart, Bill, CartItem, CartItemPatch, MenuItem, PricingPolicy};

/// Client for the cart record.
///
/// Every call is one request to the cart actor, so operations apply in the
/// order they are issued and each one is persisted before it returns.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartItem>,
    pricing: PricingPolicy,
}

impl CartClient {
    pub fn new(inner: ResourceClient<CartItem>, pricing: PricingPolicy) -> Self {
        Self { inner, pricing }
    }

    pub fn pricing(&self) -> PricingPolicy {
        self.pricing
    }

    /// Adds one unit of `item`, merging with an existing entry.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn add_item(&self, item: MenuItem) -> Result<(), CartError> {
        debug!("Sending request");
        self.inner.create(item).await?;
        Ok(())
    }

    /// Sets the quantity of an entry. Zero or below removes it; an item that
    /// is not in the cart is ignored.
    #[instrument(skip(self))]
    pub async fn set_quantity(&self, item_id: String, quantity: i64) -> Result<(), CartError> {
        debug!("Sending request");
        match self.inner.update(item_id, CartItemPatch { quantity }).await {
            Ok(Some(entry)) => {
                info!(quantity = entry.quantity, "Quantity set");
                Ok(())
            }
            Ok(None) => {
                info!("Item removed from cart");
                Ok(())
            }
            Err(FrameworkError::NotFound(_)) => {
                debug!("Item not in cart, nothing to do");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn remove_item(&self, item_id: String) -> Result<(), CartError> {
        self.set_quantity(item_id, 0).await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), CartError> {
        debug!("Sending request");
        let removed = self.inner.clear().await?;
        info!(removed, "Cart cleared");
        Ok(())
    }

    /// Sum of `price * quantity` over the cart.
    pub async fn total(&self) -> Result<u64, CartError> {
        Ok(cart::subtotal(&self.list_cart_items().await?))
    }

    /// Number of units in the cart.
    pub async fn item_count(&self) -> Result<u64, CartError> {
        Ok(cart::item_count(&self.list_cart_items().await?))
    }

    pub async fn bill(&self) -> Result<Bill, CartError> {
        Ok(self.pricing.bill(&self.list_cart_items().await?))
    }
}

impl_client_methods!(CartClient, inner: CartItem, CartError, cart_item, cart_items);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::notify::ChangeNotifier;
    use crate::storage::Storage;
    use rust_decimal::Decimal;

    fn start_cart() -> CartClient {
        let (actor, inner) =
            ResourceActor::<CartItem>::new(8, Storage::in_memory(), ChangeNotifier::default(), String::new);
        tokio::spawn(actor.run());
        CartClient::new(inner, PricingPolicy::default())
    }

    fn dish(id: &str, price: u64) -> MenuItem {
        MenuItem::new(id, "r1", id, price)
    }

    #[tokio::test]
    async fn test_add_twice_then_zero_empties_cart() {
        let cart = start_cart();
        cart.add_item(dish("X", 100)).await.unwrap();
        cart.add_item(dish("X", 100)).await.unwrap();

        let items = cart.list_cart_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);

        cart.set_quantity("X".to_string(), 0).await.unwrap();
        assert!(cart.list_cart_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_quantity_on_missing_item_is_noop() {
        let cart = start_cart();
        cart.set_quantity("ghost".to_string(), 3).await.unwrap();
        cart.remove_item("ghost".to_string()).await.unwrap();
        assert!(cart.list_cart_items().await.unwrap().is_empty());

        cart.add_item(dish("X", 10)).await.unwrap();
        cart.remove_item("X".to_string()).await.unwrap();
        cart.set_quantity("X".to_string(), 5).await.unwrap();
        assert!(cart.get_cart_item("X".to_string()).await.unwrap().is_none());

        cart.add_item(dish("X", 10)).await.unwrap();
        assert_eq!(cart.get_cart_item("X".to_string()).await.unwrap().unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_totals_and_bill() {
        let cart = start_cart();
        assert_eq!(cart.total().await.unwrap(), 0);
        assert_eq!(cart.bill().await.unwrap().total, Decimal::ZERO);

        cart.add_item(dish("A", 100)).await.unwrap();
        cart.set_quantity("A".to_string(), 2).await.unwrap();
        cart.add_item(dish("B", 50)).await.unwrap();

        assert_eq!(cart.total().await.unwrap(), 250);
        assert_eq!(cart.item_count().await.unwrap(), 3);
        assert_eq!(cart.bill().await.unwrap().total, Decimal::new(30250, 2));

        cart.clear().await.unwrap();
        assert_eq!(cart.item_count().await.unwrap(), 0);
    }
}
