use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::{DomainError, ItemId, SupplierId};
use stockroom_infra::ServiceError;

pub fn service_error_to_response(
    err: ServiceError,
    not_found_message: &'static str,
) -> axum::response::Response {
    match err {
        ServiceError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", not_found_message),
        ServiceError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "record store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

/// Create reports store failures as bad requests.
pub fn create_error_to_response(
    err: ServiceError,
    not_found_message: &'static str,
) -> axum::response::Response {
    match err {
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "record store failure on create");
            json_error(StatusCode::BAD_REQUEST, "store_error", e.to_string())
        }
        other => service_error_to_response(other, not_found_message),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    service_error_to_response(err.into(), "not found")
}

pub fn json_rejection(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn query_rejection(rejection: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_item_id(s: &str) -> Result<ItemId, axum::response::Response> {
    s.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"))
}

pub fn parse_supplier_id(s: &str) -> Result<SupplierId, axum::response::Response> {
    s.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid supplier id"))
}
