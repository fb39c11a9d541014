//! Domain model and persistence layer for the todo service.
//!
//! # Overview
//! Everything below the HTTP handlers lives here: the `Todo` entity, the
//! error taxonomy, the [`TodoRepository`] trait and its two backends.
//!
//! # Design
//! - [`TodoRepository`] is the only polymorphic seam. Handlers hold
//!   `Arc<dyn TodoRepository>` and never name a backend.
//! - [`SupabaseRepository`] talks to a hosted PostgREST endpoint. Request
//!   building and response parsing live in [`PostgrestClient`] as pure
//!   functions over plain-data `HttpRequest` / `HttpResponse`, so the wire
//!   format is testable without a network.
//! - [`MemoryRepository`] satisfies the same contract in-process.

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod postgrest;
pub mod repository;
pub mod supabase;
pub mod types;

pub use config::SupabaseConfig;
pub use error::{TodoError, TodoResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use memory::MemoryRepository;
pub use postgrest::PostgrestClient;
pub use repository::TodoRepository;
pub use supabase::SupabaseRepository;
pub use types::{Todo, TodoDraft};
