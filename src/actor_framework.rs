use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and Payloads)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Ord + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> { Ok(()) }
}

/// Errors surfaced by the store actor and its client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item {id} was modified concurrently (expected version {expected}, found {actual})")]
    Conflict { id: String, expected: u64, actual: u64 },
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// A stored item together with its row version.
///
/// The version starts at 1 and is bumped on every successful update.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub version: u64,
    pub item: T,
}

/// Predicate used by list requests.
pub struct Filter<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<Versioned<T>>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        /// When set, the write only applies if the stored version still matches.
        expected_version: Option<u64>,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    List {
        filter: Option<Filter<T>>,
        respond_to: Response<Vec<T>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, Versioned<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    pub async fn run(mut self) {
        info!(entity = std::any::type_name::<T>(), "ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update { id, patch, expected_version, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch, expected_version));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items = self
                        .store
                        .values()
                        .filter(|record| filter.as_ref().map_or(true, |f| f.matches(&record.item)))
                        .map(|record| record.item.clone())
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
            }
        }
        info!(entity = std::any::type_name::<T>(), "ResourceActor stopped");
    }

    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create(id.clone(), payload).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        debug!(id = %item.id(), "Item created");
        self.store.insert(id, Versioned { version: 1, item: item.clone() });
        Ok(item)
    }

    fn handle_update(
        &mut self,
        id: T::Id,
        patch: T::Patch,
        expected_version: Option<u64>,
    ) -> Result<T, FrameworkError> {
        let record = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        if let Some(expected) = expected_version {
            if record.version != expected {
                warn!(%id, expected, actual = record.version, "Rejecting stale update");
                return Err(FrameworkError::Conflict {
                    id: id.to_string(),
                    expected,
                    actual: record.version,
                });
            }
        }

        // Apply to a copy so a rejected patch leaves the stored row untouched
        let mut updated = record.item.clone();
        updated.on_update(patch).map_err(FrameworkError::Rejected)?;
        record.item = updated;
        record.version += 1;
        debug!(%id, version = record.version, "Item updated");
        Ok(record.item.clone())
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let record = self
            .store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        record.item.on_delete().map_err(FrameworkError::Rejected)?;
        self.store.remove(&id);
        debug!(%id, "Item deleted");
        Ok(())
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
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
        self.sender.send(build(respond_to))
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn update(
        &self,
        id: T::Id,
        patch: T::Patch,
        expected_version: Option<u64>,
    ) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, expected_version, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn list(&self, filter: Option<Filter<T>>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { filter, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u64,
        title: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        title: String,
    }

    #[derive(Debug)]
    struct NotePatch {
        title: String,
    }

    impl Entity for Note {
        type Id = u64;
        type CreatePayload = NoteCreate;
        type Patch = NotePatch;

        fn id(&self) -> &u64 { &self.id }

        fn from_create(id: u64, payload: NoteCreate) -> Result<Self, String> {
            if payload.title.is_empty() {
                return Err("title is required".to_string());
            }
            Ok(Self { id, title: payload.title })
        }

        fn on_update(&mut self, patch: NotePatch) -> Result<(), String> {
            if patch.title.is_empty() {
                return Err("title is required".to_string());
            }
            self.title = patch.title;
            Ok(())
        }
    }

    fn start() -> ResourceClient<Note> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || counter.fetch_add(1, Ordering::SeqCst);
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    // --- Test ---

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let client = start();

        let note = client.create(NoteCreate { title: "first".into() }).await.unwrap();
        assert_eq!(note.id, 1);

        let stored = client.get(1).await.unwrap().unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.item.title, "first");

        let updated = client.update(1, NotePatch { title: "second".into() }, Some(1)).await.unwrap();
        assert_eq!(updated.title, "second");
        assert_eq!(client.get(1).await.unwrap().unwrap().version, 2);

        client.delete(1).await.unwrap();
        assert_eq!(client.get(1).await.unwrap(), None);
        assert_eq!(client.delete(1).await, Err(FrameworkError::NotFound("1".into())));
    }

    #[tokio::test]
    async fn test_stale_update_is_rejected() {
        let client = start();
        client.create(NoteCreate { title: "a".into() }).await.unwrap();

        client.update(1, NotePatch { title: "b".into() }, Some(1)).await.unwrap();
        let err = client.update(1, NotePatch { title: "c".into() }, Some(1)).await.unwrap_err();
        assert_eq!(err, FrameworkError::Conflict { id: "1".into(), expected: 1, actual: 2 });

        let stored = client.get(1).await.unwrap().unwrap();
        assert_eq!(stored.item.title, "b");
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn test_rejected_payloads_leave_store_untouched() {
        let client = start();
        let err = client.create(NoteCreate { title: String::new() }).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Rejected(_)));

        client.create(NoteCreate { title: "kept".into() }).await.unwrap();
        let err = client.update(2, NotePatch { title: String::new() }, None).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Rejected(_)));
        assert_eq!(client.get(2).await.unwrap().unwrap().item.title, "kept");
        assert_eq!(client.get(2).await.unwrap().unwrap().version, 1);
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_filtered() {
        let client = start();
        for title in ["pear", "apple", "plum"] {
            client.create(NoteCreate { title: title.into() }).await.unwrap();
        }

        let all: Vec<u64> = client.list(None).await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(all, vec![1, 2, 3]);

        let p_notes = client
            .list(Some(Filter::new(|n: &Note| n.title.starts_with('p'))))
            .await
            .unwrap();
        assert_eq!(p_notes.len(), 2);
        assert!(p_notes.iter().all(|n| n.title.starts_with('p')));
    }

    #[tokio::test]
    async fn test_closed_actor_reports_error() {
        let (actor, client) = ResourceActor::<Note>::new(1, || 1);
        drop(actor);
        assert_eq!(client.list(None).await.unwrap_err(), FrameworkError::ActorClosed);
    }
}
