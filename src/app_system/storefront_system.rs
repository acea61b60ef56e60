use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::app_system::{spawn_cart_count_observer, StorefrontConfig};
use crate::clients::{CartClient, CatalogClient, OrderClient};
use crate::domain::{CartItem, MenuItem, Order, Restaurant};
use crate::notify::ChangeNotifier;
use crate::storage::{JsonFileStore, RecordKey, Storage};
use crate::tracking::TrackingHandle;

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct StorefrontSystem {
    pub catalog_client: CatalogClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    config: StorefrontConfig,
    storage: Storage,
    notifier: ChangeNotifier,
    handles: Vec<JoinHandle<()>>,
    observers: Vec<JoinHandle<()>>,
}

/// Order ids are epoch milliseconds, bumped by one when two orders land in
/// the same millisecond so they stay strictly increasing. Every id is above
/// `floor`.
fn order_id_generator(floor: i64) -> impl Fn() -> String + Send + Sync + 'static {
    let last = Arc::new(AtomicI64::new(floor));
    move || {
        let now = Utc::now().timestamp_millis();
        let previous = last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| Some(now.max(prev + 1)))
            .unwrap_or_else(|prev| prev);
        now.max(previous + 1).to_string()
    }
}

/// Largest numeric id among persisted orders, so ids stay unique across
/// restarts even if the clock went backwards.
fn highest_order_id(storage: &Storage) -> i64 {
    storage
        .load::<Order>(RecordKey::Orders)
        .iter()
        .filter_map(|order| order.id.parse::<i64>().ok())
        .max()
        .unwrap_or(0)
}

impl StorefrontSystem {
    pub fn new(config: StorefrontConfig) -> Self {
        let storage = match &config.data_file {
            Some(path) => {
                info!(path = %path.display(), "Using JSON file store");
                Storage::new(JsonFileStore::new(path.clone()))
            }
            None => {
                info!("Using in-memory store");
                Storage::in_memory()
            }
        };
        Self::with_storage(config, storage)
    }

    /// Starts the system over an existing store.
    pub fn with_storage(config: StorefrontConfig, storage: Storage) -> Self {
        let notifier = ChangeNotifier::default();
        let buffer = config.channel_buffer;

        // 1. Setup Catalog Service (reference data, keyed by seeded ids)
        let (restaurant_actor, restaurant_client) =
            ResourceActor::<Restaurant>::new(buffer, storage.clone(), notifier.clone(), String::new);
        let (menu_actor, menu_client) =
            ResourceActor::<MenuItem>::new(buffer, storage.clone(), notifier.clone(), String::new);
        let catalog_client = CatalogClient::new(restaurant_client, menu_client, config.suggestion_limits);
        let restaurant_handle = tokio::spawn(restaurant_actor.run());
        let menu_handle = tokio::spawn(menu_actor.run());

        // 2. Setup Cart Service (entries keyed by menu item id)
        let (cart_actor, cart_resource_client) =
            ResourceActor::<CartItem>::new(buffer, storage.clone(), notifier.clone(), String::new);
        let cart_client = CartClient::new(cart_resource_client, config.pricing);
        let cart_handle = tokio::spawn(cart_actor.run());

        // 3. Setup Order Service
        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(
            buffer,
            storage.clone(),
            notifier.clone(),
            order_id_generator(highest_order_id(&storage)),
        );
        let order_client = OrderClient::new(order_resource_client, cart_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        Self {
            catalog_client,
            cart_client,
            order_client,
            config,
            storage,
            notifier,
            handles: vec![restaurant_handle, menu_handle, cart_handle, order_handle],
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Starts status tracking at the configured interval.
    pub fn track(&self, order_id: String) -> TrackingHandle {
        self.order_client.track(order_id, self.config.status_interval)
    }

    /// A live count of units in the cart. The observer is stopped on shutdown.
    pub fn watch_cart_count(&mut self) -> watch::Receiver<u64> {
        let (receiver, handle) = spawn_cart_count_observer(&self.notifier, self.cart_client.clone());
        self.observers.push(handle);
        receiver
    }

    /// Stops observers, closes the actor channels and waits for the actors to
    /// finish. Any [`TrackingHandle`] still alive keeps the order actor open,
    /// so drop those first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        for observer in &self.observers {
            observer.abort();
        }
        for observer in self.observers {
            let _ = observer.await;
        }

        // Drop clients to close channels
        drop(self.order_client);
        drop(self.cart_client);
        drop(self.catalog_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
