//! Infrastructure layer: record stores, the inventory service, seeding and
//! configuration.

pub mod app_config;
pub mod inventory_service;
pub mod seed;
pub mod store;

pub use app_config::AppConfig;
pub use inventory_service::{InventoryService, ItemListing, ServiceError, ServiceResult};
pub use store::{InMemoryStore, PostgresStore, RecordStore, StoreError, StoreResult};
