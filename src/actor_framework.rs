use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Trait that any stored document must implement to be managed by [`ResourceActor`].
///
/// Hooks run against a working copy of the document. The stored version is only
/// replaced when the hook returns `Ok`, so a rejected update or action never
/// leaves a partial write behind.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    // --- Custom Actions ---
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// A value no two documents in the collection may share, checked on create.
    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// Construct the full Entity from the ID and creation parameters
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;}

/// Errors surfaced by the resource store itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Already exists: {0}")]
    Conflict(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. QUERIES AND CHANGE EVENTS
// =============================================================================

/// A filter over one collection, the analogue of a `where` clause.
///
/// The label only shows up in logs.
pub struct Query<T> {
    label: String,
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Query<T> {
    pub fn new(label: impl Into<String>, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            predicate: Box::new(predicate),
        }
    }

    pub fn all() -> Self {
        Self::new("all", |_| true)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }
}

impl<T> Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query").field("label", &self.label).finish()
    }
}

/// A change notification, delivered to every subscriber of a collection.
#[derive(Debug, Clone)]
pub enum Change<T: Entity> {
    Created(T),
    Updated(T),
    Deleted(T::Id),
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
        query: Query<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
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
}

// =============================================================================
// 4. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    collection: &'static str,
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, (u64, T)>,
    next_seq: u64,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    changes: broadcast::Sender<Change<T>>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        collection: &'static str,
        buffer_size: usize,
        change_capacity: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (changes, _) = broadcast::channel(change_capacity.max(1));
        let actor = Self {
            collection,
            receiver,
            store: HashMap::new(),
            next_seq: 0,
            next_id_fn: Box::new(next_id_fn),
            changes: changes.clone(),
        };
        let client = ResourceClient::new(sender, changes);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(collection = self.collection))]
    pub async fn run(mut self) {
        info!("Collection actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).map(|(_, item)| item.clone());
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { query, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_list(&query)));
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
            }
        }
        info!(documents = self.store.len(), "Collection actor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        if let Some(key) = item.unique_key() {
            if self.store.values().any(|(_, other)| other.unique_key() == Some(key)) {
                warn!(id = %id, "Create rejected, unique key taken");
                return Err(FrameworkError::Conflict(key.to_string()));
            }
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.store.insert(id.clone(), (seq, item.clone()));
        debug!(id = %id, "Document created");
        self.publish(Change::Created(item));
        Ok(id)
    }

    fn handle_list(&self, query: &Query<T>) -> Vec<T> {
        let mut hits: Vec<&(u64, T)> = self
            .store
            .values()
            .filter(|(_, item)| query.matches(item))
            .collect();
        hits.sort_by_key(|(seq, _)| *seq);
        debug!(query = query.label(), hits = hits.len(), "Listed documents");
        hits.into_iter().map(|(_, item)| item.clone()).collect()
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let (_, stored) = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut working = stored.clone();
        working.on_update(patch).map_err(|e| {
            warn!(id = %id, error = %e, "Update rejected");
            FrameworkError::Rejected(e)
        })?;
        *stored = working.clone();
        self.publish(Change::Updated(working.clone()));
        Ok(working)
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let (_, item) = self
            .store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete().map_err(FrameworkError::Rejected)?;
        self.store.remove(&id);
        debug!(id = %id, "Document deleted");
        self.publish(Change::Deleted(id));
        Ok(())
    }

    fn handle_action(&mut self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let (_, stored) = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut working = stored.clone();
        let result = working.handle_action(action).map_err(|e| {
            warn!(id = %id, error = %e, "Action rejected");
            FrameworkError::Rejected(e)
        })?;
        *stored = working.clone();
        self.publish(Change::Updated(working));
        Ok(result)
    }

    fn publish(&self, change: Change<T>) {
        // No subscribers is the common case; the send error only means that.
        let _ = self.changes.send(change);
    }
}

// =============================================================================
// 5. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    changes: broadcast::Sender<Change<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            changes: self.changes.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>, changes: broadcast::Sender<Change<T>>) -> Self {
        Self { sender, changes }
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
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self, query: Query<T>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { query, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }

    /// Live change stream for the collection. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Change<T>> {
        self.changes.subscribe()
    }
}

// =============================================================================
// 6. TESTS
// =============================================================================
