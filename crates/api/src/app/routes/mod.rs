use axum::{
    routing::{get, post, put},
    Router,
};

pub mod admin;
pub mod inventory;
pub mod suppliers;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .route(
            "/inventory",
            get(inventory::list_items).post(inventory::create_item),
        )
        .route(
            "/inventory/:id",
            get(inventory::get_item).delete(inventory::delete_item),
        )
        .route("/update-inventory/:id", put(inventory::update_item))
        .route("/populate-database", post(admin::populate_database))
        .route(
            "/suppliers",
            get(suppliers::list_suppliers).post(suppliers::create_supplier),
        )
        .route("/suppliers/:id", get(suppliers::get_supplier))
}
