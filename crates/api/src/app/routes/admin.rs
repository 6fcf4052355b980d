//! Maintenance routes.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::errors;
use crate::app::services::AppServices;

/// Seed the store with synthetic suppliers and items.
///
/// Appends; running it twice yields twice the rows.
pub async fn populate_database(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.inventory().populate().await {
        Ok(summary) => {
            tracing::info!(
                suppliers = summary.suppliers,
                items = summary.items,
                "populate-database finished"
            );
            (
                StatusCode::OK,
                Json(serde_json::json!({ "message": "Database populated successfully" })),
            )
                .into_response()
        }
        Err(e) => errors::service_error_to_response(e, "not found"),
    }
}
