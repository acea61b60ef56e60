use std::fmt::{Debug, Display};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::notify::ChangeNotifier;
use crate::storage::{RecordKey, Storage};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Trait that any persisted entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: PartialEq + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Record the whole collection is persisted under
    const RECORD: RecordKey;

    fn id(&self) -> &Self::Id;

    /// Identity carried by the payload itself. If the collection already holds
    /// an entity with that id, `on_merge` runs instead of a create.
    fn natural_id(_params: &Self::CreateParams) -> Option<Self::Id> {
        None
    }

    /// Construct the full Entity from the ID and creation params
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }

    fn on_merge(&mut self, _params: Self::CreateParams) -> Result<(), String> {
        Err(format!("Item already exists: {}", self.id()))
    }

    fn on_update(&mut self, patch: Self::Patch) -> Result<Retain, String>;

    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }

    /// Whether a loaded entity satisfies the collection's invariants. Entries
    /// that fail are dropped on load.
    fn is_valid(&self) -> bool {
        true
    }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

/// Whether an entity stays in its collection after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retain {
    Keep,
    Remove,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE COLLECTION (ordered, at most one entity per id)
// =============================================================================

/// The in-memory form of one persisted record.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T: Entity> {
    items: Vec<T>,
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Collection<T> {
    /// Builds a collection from loaded items. Invalid entries and later
    /// duplicates of an id are dropped, so hand-edited data cannot break the
    /// collection's invariants.
    pub fn from_items(items: Vec<T>) -> Self {
        let mut collection = Self::default();
        for item in items {
            if !item.is_valid() {
                warn!(record = T::RECORD.as_str(), id = %item.id(), "Dropping invalid entry");
                continue;
            }
            if collection.position(item.id()).is_some() {
                warn!(record = T::RECORD.as_str(), id = %item.id(), "Dropping duplicate entry");
                continue;
            }
            collection.items.push(item);
        }
        collection
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn create(
        &mut self,
        params: T::CreateParams,
        next_id: impl FnOnce() -> T::Id,
    ) -> Result<T::Id, FrameworkError> {
        let natural = T::natural_id(&params);

        if let Some(index) = natural.as_ref().and_then(|id| self.position(id)) {
            let existing = &mut self.items[index];
            existing.on_merge(params).map_err(FrameworkError::Rejected)?;
            return Ok(existing.id().clone());
        }

        let id = natural.unwrap_or_else(next_id);
        if self.position(&id).is_some() {
            return Err(FrameworkError::Rejected(format!("Item already exists: {}", id)));
        }

        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        self.items.push(item);
        Ok(id)
    }

    /// Applies a patch. Returns the updated entity, or `None` if the patch
    /// removed it.
    pub fn update(&mut self, id: &T::Id, patch: T::Patch) -> Result<Option<T>, FrameworkError> {
        let index = self
            .position(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        match self.items[index].on_update(patch).map_err(FrameworkError::Rejected)? {
            Retain::Keep => Ok(Some(self.items[index].clone())),
            Retain::Remove => {
                self.items.remove(index);
                Ok(None)
            }
        }
    }

    pub fn delete(&mut self, id: &T::Id) -> Result<(), FrameworkError> {
        let index = self
            .position(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        self.items[index].on_delete().map_err(FrameworkError::Rejected)?;
        self.items.remove(index);
        Ok(())
    }

    pub fn act(&mut self, id: &T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.handle_action(action).map_err(FrameworkError::Rejected)
    }

    /// Removes everything, provided every entity allows its deletion.
    pub fn clear(&mut self) -> Result<usize, FrameworkError> {
        for item in &self.items {
            item.on_delete().map_err(FrameworkError::Rejected)?;
        }
        let removed = self.items.len();
        self.items.clear();
        Ok(removed)
    }

    /// Fills an empty collection. A non-empty one is left untouched.
    pub fn seed(&mut self, items: Vec<T>) -> bool {
        if !self.items.is_empty() {
            return false;
        }
        *self = Self::from_items(items);
        true
    }
}

// =============================================================================
// 3. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Clear {
        respond_to: Response<usize>,
    },
    Seed {
        items: Vec<T>,
        respond_to: Response<bool>,
    },
}

// =============================================================================
// 4. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns one persisted record. Every request re-reads the full record, and
/// every mutation that changes it replaces the record and publishes a
/// [`StoreEvent`](crate::notify::StoreEvent).
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    storage: Storage,
    notifier: ChangeNotifier,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        storage: Storage,
        notifier: ChangeNotifier,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            storage,
            notifier,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(record = T::RECORD.as_str()))]
    pub async fn run(mut self) {
        info!("Actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.load().get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.load().into_items()));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
                ResourceRequest::Clear { respond_to } => {
                    let _ = respond_to.send(self.mutate(|collection| collection.clear()));
                }
                ResourceRequest::Seed { items, respond_to } => {
                    let _ = respond_to.send(self.mutate(|collection| Ok(collection.seed(items))));
                }
            }
        }

        info!("Actor stopped");
    }

    fn load(&self) -> Collection<T> {
        Collection::from_items(self.storage.load(T::RECORD))
    }

    /// Load, apply, and write back only if the record changed.
    fn mutate<R>(
        &self,
        op: impl FnOnce(&mut Collection<T>) -> Result<R, FrameworkError>,
    ) -> Result<R, FrameworkError> {
        let mut collection = self.load();
        let before = collection.clone();
        let result = op(&mut collection)?;

        if collection != before {
            self.storage
                .save(T::RECORD, collection.items())
                .map_err(|e| FrameworkError::Storage(e.to_string()))?;
            self.notifier.publish(T::RECORD);
        }
        Ok(result)
    }

    #[instrument(skip(self))]
    fn handle_create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        debug!("Processing create request");
        let result = self.mutate(|collection| collection.create(params, || (self.next_id_fn)()));
        match &result {
            Ok(id) => info!(id = %id, "Item stored"),
            Err(e) => warn!(error = %e, "Create rejected"),
        }
        result
    }

    #[instrument(fields(id = %id), skip(self, id))]
    fn handle_update(&self, id: T::Id, patch: T::Patch) -> Result<Option<T>, FrameworkError> {
        debug!("Processing update request");
        let result = self.mutate(|collection| collection.update(&id, patch));
        match &result {
            Ok(Some(_)) => info!("Item updated"),
            Ok(None) => info!("Item removed by update"),
            Err(e) => debug!(error = %e, "Update not applied"),
        }
        result
    }

    #[instrument(fields(id = %id), skip(self, id))]
    fn handle_delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        debug!("Processing delete request");
        let result = self.mutate(|collection| collection.delete(&id));
        if let Err(e) = &result {
            debug!(error = %e, "Delete not applied");
        }
        result
    }

    #[instrument(fields(id = %id), skip(self, id))]
    fn handle_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        debug!("Processing action request");
        self.mutate(|collection| collection.act(&id, action))
    }
}

// =============================================================================
// 5. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }

    pub async fn clear(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Clear { respond_to })
            .await
    }

    pub async fn seed(&self, items: Vec<T>) -> Result<bool, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Seed { items, respond_to })
            .await
    }
}

// =============================================================================
// 6. EXAMPLE USAGE (Test)
// =============================================================================
