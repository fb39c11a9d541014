//! In-process backend for tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{TodoError, TodoResult};
use crate::repository::TodoRepository;
use crate::types::{Todo, TodoDraft};

/// `TodoRepository` over a vector guarded by an async lock.
///
/// Insertion order is the natural order returned by `get_all`.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for MemoryRepository {
    async fn create(&self, id: Uuid, draft: TodoDraft) -> TodoResult<Todo> {
        let mut todos = self.todos.write().await;
        if todos.iter().any(|t| t.id == id) {
            return Err(TodoError::persistence(format!(
                "duplicate key value violates primary key: {id}"
            )));
        }
        let todo = Todo::from_draft(id, draft, Utc::now());
        todos.push(todo.clone());
        tracing::debug!(%id, "stored todo in memory");
        Ok(todo)
    }

    async fn get_all(&self) -> TodoResult<Vec<Todo>> {
        Ok(self.todos.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> TodoResult<Todo> {
        let todos = self.todos.read().await;
        todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(TodoError::NotFound(id))
    }

    async fn update(&self, id: Uuid, draft: TodoDraft) -> TodoResult<Todo> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TodoError::NotFound(id))?;
        todo.apply(draft, Utc::now());
        Ok(todo.clone())
    }

    async fn delete(&self, id: Uuid) -> TodoResult<()> {
        self.todos.write().await.retain(|t| t.id != id);
        Ok(())
    }
}
