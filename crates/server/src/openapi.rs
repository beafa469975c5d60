use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Request body for create and update. Every key is optional.
#[derive(ToSchema)]
pub struct ItemFieldsDoc {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub qty: Option<f64>,
}

#[derive(ToSchema)]
pub struct ItemDoc {
    pub id: String,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub qty: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::items::list_items,
        crate::routes::items::get_item,
        crate::routes::items::create_item,
        crate::routes::items::update_item,
        crate::routes::items::delete_item,
    ),
    components(schemas(HealthResponse, ItemFieldsDoc, ItemDoc)),
    tags((name = "health"), (name = "items"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}
