use axum::{
    extract::{Path, State},
    Json,
};
use common::client::{Client, ClientInput, DeleteOutcome, UpdateOutcome};
use service::clients::ClientKey;
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::JsonOrForm;
use crate::state::ServerState;

fn parse_id(raw: &str) -> Result<ClientKey, JsonApiError> {
    raw.trim()
        .parse::<ClientKey>()
        .map_err(|_| JsonApiError::bad_request(format!("client id must be an integer, got `{raw}`")))
}

#[utoipa::path(
    get, path = "/clients", tag = "clients",
    responses(
        (status = 200, description = "All clients", body = [crate::openapi::ClientDoc]),
        (status = 503, description = "Store Unavailable", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Client>>, JsonApiError> {
    let clients = state.clients.list().await?;
    info!(count = clients.len(), "list clients");
    Ok(Json(clients))
}

#[utoipa::path(
    get, path = "/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ClientDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Client>, JsonApiError> {
    let id = parse_id(&id)?;
    match state.clients.get(id).await? {
        Some(client) => Ok(Json(client)),
        None => Err(JsonApiError::not_found(format!("client {id} not found"))),
    }
}

#[utoipa::path(
    post, path = "/client", tag = "clients",
    request_body(content = crate::openapi::ClientInputDoc, content_type = "application/json"),
    responses(
        (status = 200, description = "Created", body = crate::openapi::ClientDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "Constraint Violation", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonOrForm(input): JsonOrForm<ClientInput>,
) -> Result<Json<Client>, JsonApiError> {
    let client = state.clients.create(&input).await?;
    Ok(Json(client))
}

#[utoipa::path(
    put, path = "/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    request_body(content = crate::openapi::ClientInputDoc, content_type = "application/json"),
    responses(
        (status = 200, description = "Update outcome; affected_rows = 0 when no client had this id", body = crate::openapi::UpdateOutcomeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found (strict mode only)", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonOrForm(input): JsonOrForm<ClientInput>,
) -> Result<Json<UpdateOutcome>, JsonApiError> {
    let id = parse_id(&id)?;
    let outcome = state.clients.update(id, &input).await?;
    Ok(Json(outcome))
}

#[utoipa::path(
    delete, path = "/client/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Delete outcome; removed = false when nothing matched", body = crate::openapi::DeleteOutcomeDoc),
        (status = 404, description = "Not Found (strict mode only)", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<DeleteOutcome>, JsonApiError> {
    let id = parse_id(&id)?;
    let outcome = state.clients.delete(id).await?;
    Ok(Json(outcome))
}
