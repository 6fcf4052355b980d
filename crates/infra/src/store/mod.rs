//! Record Store abstraction: durable storage of items and suppliers.
//!
//! Handlers never hold a store directly; they go through
//! [`crate::inventory_service::InventoryService`], which owns an
//! `Arc<dyn RecordStore>` created once at startup.

use async_trait::async_trait;
use thiserror::Error;

use stockroom_core::{ItemId, SupplierId};
use stockroom_inventory::{ItemRecord, ListQuery, Supplier};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by the underlying storage backend.
///
/// The message is passed through to callers unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Storage operations for items and suppliers.
///
/// Item -> supplier references are stored as bare ids and are never checked:
/// an item may point at a supplier that does not exist.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Items matching `query`, in the order defined by [`ListQuery::compare`].
    async fn list_items(&self, query: &ListQuery) -> StoreResult<Vec<ItemRecord>>;

    async fn get_item(&self, id: ItemId) -> StoreResult<Option<ItemRecord>>;

    async fn insert_item(&self, record: &ItemRecord) -> StoreResult<()>;

    async fn insert_items(&self, records: &[ItemRecord]) -> StoreResult<()>;

    /// Overwrite every field of an existing item. Returns `false` if no item
    /// has that id.
    async fn replace_item(&self, record: &ItemRecord) -> StoreResult<bool>;

    /// Remove an item. Removing an unknown id is not an error.
    async fn delete_item(&self, id: ItemId) -> StoreResult<()>;

    async fn get_supplier(&self, id: SupplierId) -> StoreResult<Option<Supplier>>;

    /// Fetch every supplier whose id is in `ids`; unknown ids are skipped.
    async fn get_suppliers(&self, ids: &[SupplierId]) -> StoreResult<Vec<Supplier>>;

    /// All suppliers ordered by name (byte-wise), ties by id.
    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>>;

    async fn insert_suppliers(&self, suppliers: &[Supplier]) -> StoreResult<()>;
}
