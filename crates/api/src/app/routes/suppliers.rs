use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use stockroom_inventory::SupplierDraft;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

const SUPPLIER_NOT_FOUND: &str = "Supplier not found";

pub async fn list_suppliers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.inventory().list_suppliers().await {
        Ok(suppliers) => {
            let total_count = suppliers.len();
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "suppliers": suppliers,
                    "totalCount": total_count,
                })),
            )
                .into_response()
        }
        Err(e) => errors::service_error_to_response(e, SUPPLIER_NOT_FOUND),
    }
}

pub async fn get_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_supplier_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.inventory().get_supplier(id).await {
        Ok(supplier) => (StatusCode::OK, Json(supplier)).into_response(),
        Err(e) => errors::service_error_to_response(e, SUPPLIER_NOT_FOUND),
    }
}

pub async fn create_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateSupplierRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection(rejection),
    };

    match services
        .inventory()
        .create_supplier(SupplierDraft::from(body))
        .await
    {
        Ok(supplier) => (StatusCode::CREATED, Json(supplier)).into_response(),
        Err(e) => errors::create_error_to_response(e, SUPPLIER_NOT_FOUND),
    }
}
