pub mod items;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::{metrics, openapi, state::AppState};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: item resource, health, metrics and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let item_routes = Router::new()
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/:id",
            get(items::get_item).put(items::update_item).delete(items::delete_item),
        );

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics))
        .route("/api-docs/openapi.json", get(openapi::openapi_json));

    item_routes
        .merge(ops)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request, INFO level
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and friends
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
