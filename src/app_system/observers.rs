use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::clients::CartClient;
use crate::notify::ChangeNotifier;
use crate::storage::RecordKey;

/// Keeps a watch channel in step with the number of units in the cart.
///
/// The count is re-read through the cart client whenever a cart change is
/// published. The task ends once the notifier is dropped.
pub fn spawn_cart_count_observer(
    notifier: &ChangeNotifier,
    cart: CartClient,
) -> (watch::Receiver<u64>, JoinHandle<()>) {
    let mut events = notifier.subscribe();
    let (sender, receiver) = watch::channel(0);

    let handle = tokio::spawn(async move {
        refresh(&cart, &sender).await;
        loop {
            match events.recv().await {
                Ok(event) if event.record == RecordKey::Cart => refresh(&cart, &sender).await,
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Cart observer lagged, re-reading");
                    refresh(&cart, &sender).await;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
            if sender.is_closed() {
                break;
            }
        }
    });

    (receiver, handle)
}

async fn refresh(cart: &CartClient, sender: &watch::Sender<u64>) {
    match cart.item_count().await {
        Ok(count) => {
            sender.send_replace(count);
        }
        Err(e) => warn!(error = %e, "Cart count refresh failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::domain::{CartItem, MenuItem, PricingPolicy};
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_count_follows_cart_mutations() {
        let notifier = ChangeNotifier::default();
        let (actor, inner) =
            ResourceActor::<CartItem>::new(8, Storage::in_memory(), notifier.clone(), String::new);
        tokio::spawn(actor.run());
        let cart = CartClient::new(inner, PricingPolicy::default());

        let (mut count, _handle) = spawn_cart_count_observer(&notifier, cart.clone());

        cart.add_item(MenuItem::new("a", "r1", "Idli", 70)).await.unwrap();
        cart.add_item(MenuItem::new("a", "r1", "Idli", 70)).await.unwrap();
        count.wait_for(|n| *n == 2).await.unwrap();

        cart.set_quantity("a".to_string(), 5).await.unwrap();
        count.wait_for(|n| *n == 5).await.unwrap();

        cart.clear().await.unwrap();
        count.wait_for(|n| *n == 0).await.unwrap();
    }
}
