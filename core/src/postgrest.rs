//! Stateless request builder and response parser for the PostgREST `todos`
//! table exposed by a Supabase project.
//!
//! # Design
//! `PostgrestClient` holds only the table endpoint and the API key and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the actual HTTP
//! round-trip, keeping this module deterministic and free of I/O.
//!
//! PostgREST always answers with a JSON array of rows, even for filtered
//! single-row queries, so single-record operations check the row count
//! themselves.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::config::SupabaseConfig;
use crate::error::{TodoError, TodoResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Todo, TodoDraft};

/// Logical table every request targets.
pub const TABLE: &str = "todos";

/// Body of a PATCH: everything except the identity columns.
#[derive(Debug, Clone, Serialize)]
struct TodoPatch<'a> {
    title: &'a str,
    description: Option<&'a str>,
    completed: bool,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PostgrestClient {
    endpoint: String,
    api_key: String,
}

impl PostgrestClient {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            endpoint: format!("{}/rest/v1/{TABLE}", config.url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
        }
    }

    fn request(&self, method: HttpMethod, query: &str, body: Option<String>) -> HttpRequest {
        let url = if query.is_empty() {
            self.endpoint.clone()
        } else {
            format!("{}?{query}", self.endpoint)
        };
        let mut headers = vec![
            ("apikey".to_string(), self.api_key.clone()),
            ("authorization".to_string(), format!("Bearer {}", self.api_key)),
            ("accept".to_string(), "application/json".to_string()),
        ];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
            headers.push(("prefer".to_string(), "return=representation".to_string()));
        }
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    pub fn build_select_all(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "select=*", None)
    }

    pub fn build_select_one(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("select=*&id=eq.{id}"), None)
    }

    pub fn build_insert(&self, todo: &Todo) -> TodoResult<HttpRequest> {
        let body = serde_json::to_string(todo)?;
        Ok(self.request(HttpMethod::Post, "", Some(body)))
    }

    /// Replace the mutable columns of `id`. `id` and `created_at` are never
    /// sent, so the backend keeps its own values.
    pub fn build_update(
        &self,
        id: Uuid,
        draft: &TodoDraft,
        updated_at: DateTime<Utc>,
    ) -> TodoResult<HttpRequest> {
        let patch = TodoPatch {
            title: &draft.title,
            description: draft.description.as_deref(),
            completed: draft.completed,
            updated_at,
        };
        let body = serde_json::to_string(&patch)?;
        Ok(self.request(HttpMethod::Patch, &format!("id=eq.{id}"), Some(body)))
    }

    pub fn build_delete(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("id=eq.{id}"), None)
    }

    pub fn parse_select_all(&self, response: HttpResponse) -> TodoResult<Vec<Todo>> {
        check_status(&response, &[200])?;
        Ok(serde_json::from_str(&response.body)?)
    }

    pub fn parse_select_one(&self, id: Uuid, response: HttpResponse) -> TodoResult<Todo> {
        check_status(&response, &[200])?;
        single_row(id, &response.body, TodoError::NotFound(id))
    }

    /// An insert that echoes back no row failed on the backend side; the
    /// record was never missing.
    pub fn parse_insert(&self, id: Uuid, response: HttpResponse) -> TodoResult<Todo> {
        check_status(&response, &[201, 200])?;
        let empty = TodoError::Persistence(format!("no todo created for {id}"));
        single_row(id, &response.body, empty)
    }

    pub fn parse_update(&self, id: Uuid, response: HttpResponse) -> TodoResult<Todo> {
        check_status(&response, &[200])?;
        single_row(id, &response.body, TodoError::NotFound(id))
    }

    /// A filter that matched nothing still yields 204, so deleting an absent
    /// id is indistinguishable from deleting a present one.
    pub fn parse_delete(&self, response: HttpResponse) -> TodoResult<()> {
        check_status(&response, &[204, 200])
    }
}

/// Map unexpected status codes to `Persistence`, keeping the backend's body.
fn check_status(response: &HttpResponse, expected: &[u16]) -> TodoResult<()> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    Err(TodoError::Persistence(format!(
        "HTTP {}: {}",
        response.status, response.body
    )))
}

/// Decode a row array that must hold exactly one todo. `empty` is the error
/// for a zero-row answer.
fn single_row(id: Uuid, body: &str, empty: TodoError) -> TodoResult<Todo> {
    let mut rows: Vec<Todo> = serde_json::from_str(body)?;
    match rows.len() {
        0 => Err(empty),
        1 => Ok(rows.remove(0)),
        n => Err(TodoError::Persistence(format!(
            "expected exactly one row for {id}, got {n}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    fn client() -> PostgrestClient {
        PostgrestClient::new(&SupabaseConfig::new("https://project.supabase.co", "anon-key"))
    }

    fn id() -> Uuid {
        Uuid::parse_str(ID).unwrap()
    }

    fn sample() -> Todo {
        Todo::from_draft(
            id(),
            TodoDraft::new("Buy groceries").with_description("Get milk and bread"),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
    }

    fn row_json() -> String {
        serde_json::to_string(&sample()).unwrap()
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn every_request_carries_credentials() {
        let req = client().build_select_all();
        assert_eq!(req.header("apikey"), Some("anon-key"));
        assert_eq!(req.header("Authorization"), Some("Bearer anon-key"));
        assert_eq!(req.header("accept"), Some("application/json"));
    }

    #[test]
    fn build_select_all_produces_correct_request() {
        let req = client().build_select_all();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://project.supabase.co/rest/v1/todos?select=*");
        assert!(req.body.is_none());
        assert!(req.header("prefer").is_none());
    }

    #[test]
    fn build_select_one_filters_by_id() {
        let req = client().build_select_one(id());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            format!("https://project.supabase.co/rest/v1/todos?select=*&id=eq.{ID}")
        );
    }

    #[test]
    fn build_insert_sends_full_record() {
        let req = client().build_insert(&sample()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "https://project.supabase.co/rest/v1/todos");
        assert_eq!(req.header("prefer"), Some("return=representation"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], ID);
        assert_eq!(body["title"], "Buy groceries");
        assert_eq!(body["created_at"], body["updated_at"]);
    }

    #[test]
    fn build_update_omits_identity_columns() {
        let draft = TodoDraft::new("Buy groceries").with_description("Get milk and bread");
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap();
        let req = client().build_update(id(), &draft, now).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(
            req.url,
            format!("https://project.supabase.co/rest/v1/todos?id=eq.{ID}")
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert!(body.get("id").is_none());
        assert!(body.get("created_at").is_none());
        assert_eq!(body["description"], "Get milk and bread");
        assert_eq!(body["completed"], false);
        assert_eq!(body["updated_at"], "2024-05-02T08:30:00Z");
    }

    #[test]
    fn build_delete_filters_by_id() {
        let req = client().build_delete(id());
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.url.ends_with(&format!("/todos?id=eq.{ID}")));
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PostgrestClient::new(&SupabaseConfig::new("http://localhost:54321/", "k"));
        let req = client.build_select_all();
        assert_eq!(req.url, "http://localhost:54321/rest/v1/todos?select=*");
    }

    #[test]
    fn parse_select_all_success() {
        let body = format!("[{}]", row_json());
        let todos = client().parse_select_all(response(200, &body)).unwrap();
        assert_eq!(todos, vec![sample()]);
    }

    #[test]
    fn parse_select_all_bad_json() {
        let err = client().parse_select_all(response(200, "not json")).unwrap_err();
        assert!(matches!(err, TodoError::Persistence(_)));
    }

    #[test]
    fn parse_select_one_empty_is_not_found() {
        let err = client().parse_select_one(id(), response(200, "[]")).unwrap_err();
        assert!(matches!(err, TodoError::NotFound(got) if got == id()));
    }

    #[test]
    fn parse_select_one_rejects_multiple_rows() {
        let body = format!("[{0},{0}]", row_json());
        let err = client().parse_select_one(id(), response(200, &body)).unwrap_err();
        assert!(matches!(err, TodoError::Persistence(msg) if msg.contains("got 2")));
    }

    #[test]
    fn parse_insert_success() {
        let body = format!("[{}]", row_json());
        let todo = client().parse_insert(id(), response(201, &body)).unwrap();
        assert_eq!(todo.title, "Buy groceries");
    }

    #[test]
    fn parse_insert_wrong_status() {
        let err = client()
            .parse_insert(id(), response(409, r#"{"code":"23505"}"#))
            .unwrap_err();
        assert!(matches!(err, TodoError::Persistence(msg) if msg.starts_with("HTTP 409")));
    }

    #[test]
    fn parse_insert_without_rows_is_a_persistence_failure() {
        let err = client().parse_insert(id(), response(201, "[]")).unwrap_err();
        assert!(matches!(err, TodoError::Persistence(msg) if msg.starts_with("no todo created")));
    }

    #[test]
    fn parse_update_empty_is_not_found() {
        let err = client().parse_update(id(), response(200, "[]")).unwrap_err();
        assert!(matches!(err, TodoError::NotFound(_)));
    }

    #[test]
    fn backend_404_is_a_persistence_failure() {
        let err = client()
            .parse_select_one(id(), response(404, "relation does not exist"))
            .unwrap_err();
        assert!(matches!(err, TodoError::Persistence(_)));
    }

    #[test]
    fn parse_delete_accepts_no_content() {
        assert!(client().parse_delete(response(204, "")).is_ok());
        assert!(client().parse_delete(response(200, "[]")).is_ok());
    }

    #[test]
    fn parse_delete_server_error() {
        let err = client().parse_delete(response(500, "boom")).unwrap_err();
        assert!(matches!(err, TodoError::Persistence(_)));
    }
}
