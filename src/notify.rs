//! Change notification: a broadcast fired after every record mutation.
//!
//! Observers subscribe, wait for an event naming the record they care about,
//! and then re-read the full state through the relevant client.

use tokio::sync::broadcast;
use tracing::trace;

use crate::storage::RecordKey;

/// A persisted record was rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEvent {
    pub record: RecordKey,
}

#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<StoreEvent>,
}

impl ChangeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event. Having no subscribers is not an error.
    pub fn publish(&self, record: RecordKey) {
        let delivered = self.sender.send(StoreEvent { record }).unwrap_or(0);
        trace!(%record, subscribers = delivered, "Change published");
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}
