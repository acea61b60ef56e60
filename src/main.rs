use tracing::{error, info, Instrument};

use storefront::app_system::{setup_tracing, StorefrontConfig, StorefrontSystem};
use storefront::domain::DeliveryAddress;
use storefront::seed::CatalogSeed;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StorefrontConfig::from_env();
    info!(?config, "Starting storefront");

    let mut system = StorefrontSystem::new(config);
    let cart_count = system.watch_cart_count();

    system
        .catalog_client
        .ensure_seeded(CatalogSeed::demo())
        .await
        .map_err(|e| e.to_string())?;

    // Browse: search, then open the menu of the first match
    let span = tracing::info_span!("browse");
    let menu = async {
        let suggestions = system.catalog_client.suggest("dosa").await?;
        for suggestion in &suggestions {
            info!(name = suggestion.name(), restaurant_id = suggestion.restaurant_id(), "Suggestion");
        }
        let restaurant_id = suggestions
            .first()
            .map(|s| s.restaurant_id().to_string())
            .unwrap_or_else(|| "1".to_string());
        system.catalog_client.menu_for(restaurant_id).await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    // Fill the cart
    for item in menu.iter().take(2) {
        system.cart_client.add_item(item.clone()).await.map_err(|e| e.to_string())?;
    }
    if let Some(first) = menu.first() {
        system.cart_client.add_item(first.clone()).await.map_err(|e| e.to_string())?;
    }

    let bill = system.cart_client.bill().await.map_err(|e| e.to_string())?;
    info!(
        items = *cart_count.borrow(),
        subtotal = %bill.subtotal,
        delivery_fee = %bill.delivery_fee,
        taxes = %bill.taxes,
        total = %bill.total,
        "Cart ready"
    );

    // Checkout - this flows through the cart and order actors
    let address = DeliveryAddress::new("Asha Rao", "9876543210", "12 Residency Road", "560025");
    let span = tracing::info_span!("checkout");
    let order_result = async { system.order_client.checkout(address, "upi").await }
        .instrument(span)
        .await;

    match order_result {
        Ok(order_id) => {
            info!(order_id = %order_id, "Order placed successfully");

            let tracker = system.track(order_id.clone());
            let deadline = system.config().status_interval * 4;
            tokio::time::sleep(deadline).await;
            drop(tracker);

            if let Ok(Some(order)) = system.order_client.get_order(order_id).await {
                for step in order.progress() {
                    info!(step = step.status.label(), complete = step.complete, "Tracking");
                }
            }
        }
        Err(e) => {
            error!(error = %e, "Checkout failed")
        }
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
