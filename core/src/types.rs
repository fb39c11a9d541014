//! Domain types for the todo service.
//!
//! # Design
//! `Todo` is the stored record exactly as the `todos` table holds it, so the
//! same type is used for the HTTP surface and the PostgREST wire format.
//! `TodoDraft` carries only the client-controlled fields; unknown fields such
//! as `id` or timestamps are dropped when decoding, which is how inbound
//! bodies get to "ignore" them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single stored todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Build a fresh record from a draft. Both timestamps are set to `now`.
    pub fn from_draft(id: Uuid, draft: TodoDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            completed: draft.completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the client-controlled fields and move `updated_at` forward.
    ///
    /// `updated_at` never goes backwards, even if the clock does.
    pub fn apply(&mut self, draft: TodoDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.description = draft.description;
        self.completed = draft.completed;
        self.updated_at = now.max(self.updated_at);
    }
}

/// Client-supplied fields for creating or replacing a todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}
