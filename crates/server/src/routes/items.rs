use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use configs::NotFoundPolicy;
use models::item::{Item, ItemFields};
use service::errors::ServiceError;
use tracing::info;

use crate::{errors::JsonApiError, metrics, state::AppState};

/// Plain-text answer of get-by-id for an unknown id.
pub fn no_item_message(id: &str) -> String {
    format!("there is no item with id {id}")
}

fn item_not_found(id: &str) -> JsonApiError {
    ServiceError::NotFound(no_item_message(id)).into()
}

/// Update and delete answer `null` for an unknown id unless the policy is strict.
fn item_or_null(policy: NotFoundPolicy, id: &str, found: Option<Item>) -> Result<Json<Option<Item>>, JsonApiError> {
    match (found, policy) {
        (Some(item), _) => Ok(Json(Some(item))),
        (None, NotFoundPolicy::Legacy) => Ok(Json(None)),
        (None, NotFoundPolicy::Strict) => Err(item_not_found(id)),
    }
}

#[utoipa::path(
    get, path = "/items", tag = "items",
    responses(
        (status = 200, description = "All items", body = [crate::openapi::ItemDoc]),
        (status = 500, description = "Store Failure")
    )
)]
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, JsonApiError> {
    metrics::record("list");
    let items = state.items.get_all().await?;
    info!(count = items.len(), "list items");
    Ok(Json(items))
}

#[utoipa::path(
    get, path = "/items/{id}", tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "The item, or a plain-text message when it does not exist", body = crate::openapi::ItemDoc),
        (status = 400, description = "Invalid Id"),
        (status = 404, description = "Not Found (strict policy only)")
    )
)]
pub async fn get_item(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, JsonApiError> {
    metrics::record("get");
    match state.items.get_one(&id).await? {
        Some(item) => Ok(Json(item).into_response()),
        None => match state.not_found {
            NotFoundPolicy::Legacy => Ok(no_item_message(&id).into_response()),
            NotFoundPolicy::Strict => Err(item_not_found(&id)),
        },
    }
}

#[utoipa::path(
    post, path = "/items", tag = "items",
    request_body = crate::openapi::ItemFieldsDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ItemDoc),
        (status = 500, description = "Store Failure")
    )
)]
pub async fn create_item(State(state): State<AppState>, Json(fields): Json<ItemFields>) -> Result<(StatusCode, Json<Item>), JsonApiError> {
    metrics::record("create");
    let item = state.items.create(fields).await?;
    info!(id = %item.id, "created item");
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put, path = "/items/{id}", tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    request_body = crate::openapi::ItemFieldsDoc,
    responses(
        (status = 200, description = "Updated item, or null when it does not exist", body = crate::openapi::ItemDoc),
        (status = 400, description = "Invalid Id"),
        (status = 404, description = "Not Found (strict policy only)")
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<ItemFields>,
) -> Result<Json<Option<Item>>, JsonApiError> {
    metrics::record("update");
    let updated = state.items.update(&id, fields).await?;
    if updated.is_some() {
        info!(id = %id, "updated item");
    }
    item_or_null(state.not_found, &id, updated)
}

#[utoipa::path(
    delete, path = "/items/{id}", tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Deleted item, or null when it does not exist", body = crate::openapi::ItemDoc),
        (status = 400, description = "Invalid Id"),
        (status = 404, description = "Not Found (strict policy only)")
    )
)]
pub async fn delete_item(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Option<Item>>, JsonApiError> {
    metrics::record("delete");
    let deleted = state.items.delete(&id).await?;
    if deleted.is_some() {
        info!(id = %id, "deleted item");
    }
    item_or_null(state.not_found, &id, deleted)
}
