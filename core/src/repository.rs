//! The persistence seam between the HTTP layer and a storage backend.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::TodoResult;
use crate::types::{Todo, TodoDraft};

/// CRUD contract every todo backend satisfies.
///
/// Handlers only ever see `Arc<dyn TodoRepository>`, so swapping the hosted
/// backend for [`MemoryRepository`](crate::MemoryRepository) or another
/// store does not touch them.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Persist a new record under `id`. Both timestamps are set to the same
    /// instant. Returns the record as stored.
    async fn create(&self, id: Uuid, draft: TodoDraft) -> TodoResult<Todo>;

    /// Every stored todo, in the backend's natural order.
    async fn get_all(&self) -> TodoResult<Vec<Todo>>;

    /// Fails with `NotFound` when no record has this id.
    async fn get_by_id(&self, id: Uuid) -> TodoResult<Todo>;

    /// Replace title, description and completed, refreshing `updated_at`.
    /// Fails with `NotFound` rather than creating a record.
    async fn update(&self, id: Uuid, draft: TodoDraft) -> TodoResult<Todo>;

    /// Hard delete. Deleting an id that does not exist succeeds.
    async fn delete(&self, id: Uuid) -> TodoResult<()>;
}
