//! `stockroom-client`
//!
//! **Responsibility:** Browser client for the inventory API.
//!
//! This crate provides:
//! - A typed HTTP client for the inventory endpoints
//! - Local pagination and search over the fetched list
//! - A leptos single-page frontend (wasm32 only)
//!
//! The API remains the authority; the client keeps no state beyond the last
//! fetched list.

pub mod api;
pub mod pagination;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use api::{ApiClient, ClientError, InventoryApi, NewItem};
pub use view::InventoryView;

/// Base URL of the backend, fixed at build time.
pub fn backend_url() -> &'static str {
    option_env!("STOCKROOM_BACKEND_URL").unwrap_or("http://localhost:3001")
}
