use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

const ITEM_NOT_FOUND: &str = "Inventory item not found";

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<dto::ListInventoryParams>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(rejection) => return errors::query_rejection(rejection),
    };
    let query = match params.to_query() {
        Ok(q) => q,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory().list_items(&query).await {
        Ok(listing) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "inventory": listing.items,
                "totalCount": listing.total_count,
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e, ITEM_NOT_FOUND),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.inventory().get_item(id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => errors::service_error_to_response(e, ITEM_NOT_FOUND),
    }
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::ItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection(rejection),
    };
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory().create_item(draft).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => errors::create_error_to_response(e, ITEM_NOT_FOUND),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::ItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match errors::parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection(rejection),
    };
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory().update_item(id, draft).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => errors::service_error_to_response(e, ITEM_NOT_FOUND),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.inventory().delete_item(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Item deleted successfully" })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e, ITEM_NOT_FOUND),
    }
}
