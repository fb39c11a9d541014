//! `TodoRepository` backed by a Supabase project's PostgREST API.
//!
//! # Design
//! Request shapes come from [`PostgrestClient`]; this module only performs
//! the round-trip. `ureq` is a blocking client, so each call runs on tokio's
//! blocking pool and the request handler task just awaits it. There are no
//! retries: a failed call surfaces immediately as `Persistence`.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::config::SupabaseConfig;
use crate::error::{TodoError, TodoResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::postgrest::PostgrestClient;
use crate::repository::TodoRepository;
use crate::types::{Todo, TodoDraft};

#[derive(Clone)]
pub struct SupabaseRepository {
    client: PostgrestClient,
    agent: ureq::Agent,
}

impl SupabaseRepository {
    pub fn new(config: &SupabaseConfig) -> Self {
        // Status interpretation belongs to PostgrestClient, so 4xx/5xx must
        // come back as data rather than `Err`.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            client: PostgrestClient::new(config),
            agent,
        }
    }

    async fn send(&self, req: HttpRequest) -> TodoResult<HttpResponse> {
        let agent = self.agent.clone();
        tracing::debug!(method = ?req.method, url = %req.url, "calling data API");
        let response = tokio::task::spawn_blocking(move || execute(&agent, req))
            .await
            .map_err(|e| TodoError::persistence(format!("request task failed: {e}")))??;
        tracing::debug!(status = response.status, "data API answered");
        Ok(response)
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Execute an `HttpRequest` and return the response as data.
fn execute(agent: &ureq::Agent, req: HttpRequest) -> TodoResult<HttpResponse> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
    } = req;

    // PostgrestClient attaches a body to every POST and PATCH.
    let body = body.unwrap_or_default();
    let result = match method {
        HttpMethod::Get => with_headers(agent.get(&url), &headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(&url), &headers).call(),
        HttpMethod::Post => with_headers(agent.post(&url), &headers).send(body.as_bytes()),
        HttpMethod::Patch => with_headers(agent.patch(&url), &headers).send(body.as_bytes()),
    };

    let mut response =
        result.map_err(|e| TodoError::persistence(format!("transport error: {e}")))?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| TodoError::persistence(format!("reading response body: {e}")))?;

    Ok(HttpResponse { status, body })
}

#[async_trait]
impl TodoRepository for SupabaseRepository {
    async fn create(&self, id: Uuid, draft: TodoDraft) -> TodoResult<Todo> {
        let todo = Todo::from_draft(id, draft, Utc::now());
        let req = self.client.build_insert(&todo)?;
        let response = self.send(req).await?;
        self.client.parse_insert(id, response)
    }

    async fn get_all(&self) -> TodoResult<Vec<Todo>> {
        let response = self.send(self.client.build_select_all()).await?;
        self.client.parse_select_all(response)
    }

    async fn get_by_id(&self, id: Uuid) -> TodoResult<Todo> {
        let response = self.send(self.client.build_select_one(id)).await?;
        self.client.parse_select_one(id, response)
    }

    async fn update(&self, id: Uuid, draft: TodoDraft) -> TodoResult<Todo> {
        let req = self.client.build_update(id, &draft, Utc::now())?;
        let response = self.send(req).await?;
        self.client.parse_update(id, response)
    }

    async fn delete(&self, id: Uuid) -> TodoResult<()> {
        let response = self.send(self.client.build_delete(id)).await?;
        self.client.parse_delete(response)
    }
}
