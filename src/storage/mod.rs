//! Persisted state: four named records, each a JSON array stored as text in a
//! key-value store.
//!
//! Every read re-fetches and decodes the whole record and every write replaces
//! it. Missing or undecodable records load as empty sequences.

mod error;
mod file;
mod memory;

pub use error::*;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Names of the persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Restaurants,
    MenuItems,
    Cart,
    Orders,
}

impl RecordKey {
    /// Key under which the record is stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKey::Restaurants => "restaurants",
            RecordKey::MenuItems => "menuItems",
            RecordKey::Cart => "cart",
            RecordKey::Orders => "orders",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw string storage, one value per key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed access to the named records over any [`KeyValueStore`].
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Loads a whole record. Absent, unreadable or malformed data yields an
    /// empty sequence.
    pub fn load<T: DeserializeOwned>(&self, record: RecordKey) -> Vec<T> {
        let raw = match self.backend.get(record.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(%record, error = %e, "Record unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(%record, error = %e, "Record malformed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replaces a whole record.
    pub fn save<T: Serialize>(&self, record: RecordKey, items: &[T]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)?;
        debug!(%record, entries = items.len(), bytes = raw.len(), "Writing record");
        self.backend.set(record.as_str(), raw)
    }

    /// Writes raw text under a record key, bypassing encoding.
    pub fn put_raw(&self, record: RecordKey, raw: impl Into<String>) -> Result<(), StorageError> {
        self.backend.set(record.as_str(), raw.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Restaurant;

    fn restaurant(id: &str) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: format!("Restaurant {}", id),
            cuisine: vec!["South Indian".to_string()],
            rating: 4.2,
            delivery_time: "30 min".to_string(),
            price_range: "₹₹".to_string(),
            image: String::new(),
            is_veg: true,
        }
    }

    #[test]
    fn test_missing_record_loads_empty() {
        let storage = Storage::in_memory();
        let items: Vec<Restaurant> = storage.load(RecordKey::Restaurants);
        assert!(items.is_empty());
    }

    #[test]
    fn test_malformed_record_loads_empty() {
        let storage = Storage::in_memory();
        storage.put_raw(RecordKey::Cart, "{not json").unwrap();
        let items: Vec<Restaurant> = storage.load(RecordKey::Cart);
        assert!(items.is_empty());

        // Valid JSON of the wrong shape is malformed too.
        storage.put_raw(RecordKey::Cart, r#"{"cart": 1}"#).unwrap();
        let items: Vec<Restaurant> = storage.load(RecordKey::Cart);
        assert!(items.is_empty());
    }

    #[test]
    fn test_save_replaces_whole_record() {
        let storage = Storage::in_memory();
        storage
            .save(RecordKey::Restaurants, &[restaurant("r1"), restaurant("r2")])
            .unwrap();
        storage.save(RecordKey::Restaurants, &[restaurant("r3")]).unwrap();

        let items: Vec<Restaurant> = storage.load(RecordKey::Restaurants);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "r3");
    }

    #[test]
    fn test_records_use_camel_case_keys() {
        let storage = Storage::in_memory();
        storage.save(RecordKey::Restaurants, &[restaurant("r1")]).unwrap();

        let raw = storage.backend.get("restaurants").unwrap().unwrap();
        assert!(raw.contains("\"deliveryTime\""));
        assert!(raw.contains("\"isVeg\":true"));
    }
}
