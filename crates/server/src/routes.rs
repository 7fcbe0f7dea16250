pub mod clients;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// CRUD routes for one spelling of the collection (`clients`) and item
/// (`client`) segments. Both segments accept every operation on `/{id}`.
fn client_routes(collection: &str, item: &str) -> Router<ServerState> {
    Router::new()
        .route(&format!("/{collection}"), get(clients::list).post(clients::create))
        .route(
            &format!("/{collection}/:id"),
            get(clients::get).put(clients::update).delete(clients::delete),
        )
        .route(&format!("/{item}"), post(clients::create))
        .route(
            &format!("/{item}/:id"),
            get(clients::get).put(clients::update).delete(clients::delete),
        )
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    // English paths plus the Portuguese ones older front-end builds still call
    let api = client_routes("clients", "client").merge(client_routes("clientes", "cliente"));

    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
