//! Typed consumer of the client registry HTTP API.
//!
//! Screens used to re-implement the key-casing fallbacks on every call. This
//! client does it once: every payload goes through `common::client`
//! normalization, and single-record calls tolerate list-shaped answers from
//! older deployments.

mod error;

pub use error::ClientError;

use common::client::{
    normalize_many, normalize_single, Client, ClientId, ClientInput, DeleteOutcome, UpdateOutcome,
};
use common::types::ErrorBody;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list(&self) -> Result<Vec<Client>, ClientError> {
        let body = read_json(self.http.get(self.url("/clients")).send().await?).await?;
        Ok(normalize_many(&body))
    }

    /// `Ok(None)` when the server has no client with this id.
    pub async fn get(&self, id: &ClientId) -> Result<Option<Client>, ClientError> {
        let resp = self.http.get(self.url(&format!("/clients/{id}"))).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = read_json(resp).await?;
        Ok(normalize_single(&body))
    }

    pub async fn create(&self, input: &ClientInput) -> Result<Client, ClientError> {
        let body = read_json(self.http.post(self.url("/client")).json(input).send().await?).await?;
        normalize_single(&body).ok_or_else(|| ClientError::Decode(format!("create returned {body}")))
    }

    pub async fn update(&self, id: &ClientId, input: &ClientInput) -> Result<UpdateOutcome, ClientError> {
        let resp = self.http.put(self.url(&format!("/clients/{id}"))).json(input).send().await?;
        let body = read_json(resp).await?;
        Ok(decode_update(id, &body))
    }

    pub async fn delete(&self, id: &ClientId) -> Result<DeleteOutcome, ClientError> {
        let body = read_json(self.http.delete(self.url(&format!("/client/{id}"))).send().await?).await?;
        Ok(decode_delete(id, &body))
    }
}

async fn read_json(resp: Response) -> Result<Value, ClientError> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        let parsed: Option<ErrorBody> = serde_json::from_str(&text).ok();
        return Err(match parsed {
            Some(body) => ClientError::Status { status: status.as_u16(), error: body.error, message: body.message },
            None => ClientError::Status { status: status.as_u16(), error: text, message: None },
        });
    }
    debug!(status = status.as_u16(), bytes = text.len(), "registry response");
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Row count from either the outcome shape or a bare driver result
/// (`affectedRows`), possibly wrapped in a one-element list.
fn affected_rows(body: &Value) -> u64 {
    let body = match body {
        Value::Array(items) => match items.first() {
            Some(first) => first,
            None => return 0,
        },
        other => other,
    };
    ["affected_rows", "affectedRows"]
        .iter()
        .find_map(|k| body.get(*k).and_then(Value::as_u64))
        .unwrap_or(0)
}

fn decode_update(id: &ClientId, body: &Value) -> UpdateOutcome {
    let affected_rows = affected_rows(body);
    let client = body
        .get("client")
        .and_then(normalize_single)
        .filter(|_| affected_rows > 0);
    UpdateOutcome { id: id.clone(), affected_rows, client }
}

fn decode_delete(id: &ClientId, body: &Value) -> DeleteOutcome {
    let affected_rows = affected_rows(body);
    DeleteOutcome { id: id.clone(), affected_rows, removed: affected_rows > 0 }
}
