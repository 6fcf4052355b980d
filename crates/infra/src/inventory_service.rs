//! Inventory Query Service.
//!
//! All item operations go through here. Supplier references are resolved in
//! this module only: listing and lookups replace stored supplier ids with the
//! full records, and create/update resolve the requested supplier id before
//! writing.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use stockroom_core::{DomainError, ItemId, SupplierId};
use stockroom_inventory::{Item, ItemDraft, ItemRecord, ListQuery, Supplier, SupplierDraft};

use crate::seed::{SeedBatch, SeedSummary};
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => ServiceError::NotFound,
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
                ServiceError::Validation(msg)
            }
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result of a listing: the ordered items plus their count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListing {
    pub items: Vec<Item>,
    pub total_count: usize,
}

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn RecordStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Filtered, ordered listing with suppliers resolved. No paging: the whole
    /// matching set is returned.
    #[instrument(skip(self), err)]
    pub async fn list_items(&self, query: &ListQuery) -> ServiceResult<ItemListing> {
        let records = self.store.list_items(query).await?;
        let items = self.resolve_many(records).await?;
        let total_count = items.len();
        tracing::debug!(total_count, "listed inventory items");
        Ok(ItemListing { items, total_count })
    }

    #[instrument(skip(self), fields(item_id = %id), err)]
    pub async fn get_item(&self, id: ItemId) -> ServiceResult<Item> {
        let record = self.store.get_item(id).await?.ok_or(ServiceError::NotFound)?;
        self.resolve_one(record).await
    }

    /// Create an item. A supplier id that does not resolve is dropped; the
    /// item is still created.
    #[instrument(skip(self, draft), fields(item_name = %draft.name), err)]
    pub async fn create_item(&self, draft: ItemDraft) -> ServiceResult<Item> {
        draft.validate()?;
        let supplier = self.lookup_supplier(draft.supplier_id).await?;

        let record = draft.into_record(ItemId::new(), supplier.as_ref().map(|s| s.id));
        self.store.insert_item(&record).await?;

        tracing::info!(item_id = %record.id, "inventory item created");
        Ok(record.resolve(supplier))
    }

    /// Full replace of name, quantity and supplier.
    #[instrument(skip(self, draft), fields(item_id = %id), err)]
    pub async fn update_item(&self, id: ItemId, draft: ItemDraft) -> ServiceResult<Item> {
        draft.validate()?;
        if self.store.get_item(id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }
        let supplier = self.lookup_supplier(draft.supplier_id).await?;

        let record = draft.into_record(id, supplier.as_ref().map(|s| s.id));
        // The row can vanish between the existence check and the write.
        if !self.store.replace_item(&record).await? {
            return Err(ServiceError::NotFound);
        }

        tracing::info!("inventory item updated");
        Ok(record.resolve(supplier))
    }

    /// Idempotent: deleting an unknown id succeeds.
    #[instrument(skip(self), fields(item_id = %id), err)]
    pub async fn delete_item(&self, id: ItemId) -> ServiceResult<()> {
        self.store.delete_item(id).await?;
        tracing::info!("inventory item deleted");
        Ok(())
    }

    #[instrument(skip(self), err)]
    pub async fn list_suppliers(&self) -> ServiceResult<Vec<Supplier>> {
        Ok(self.store.list_suppliers().await?)
    }

    #[instrument(skip(self), fields(supplier_id = %id), err)]
    pub async fn get_supplier(&self, id: SupplierId) -> ServiceResult<Supplier> {
        self.store
            .get_supplier(id)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    #[instrument(skip(self, draft), fields(supplier_name = %draft.name), err)]
    pub async fn create_supplier(&self, draft: SupplierDraft) -> ServiceResult<Supplier> {
        draft.validate()?;
        let supplier = draft.into_supplier(SupplierId::new());
        self.store
            .insert_suppliers(std::slice::from_ref(&supplier))
            .await?;
        tracing::info!(supplier_id = %supplier.id, "supplier created");
        Ok(supplier)
    }

    /// Seed the store with synthetic suppliers and items.
    #[instrument(skip(self), err)]
    pub async fn populate(&self) -> ServiceResult<SeedSummary> {
        let batch = SeedBatch::generate(&mut rand::thread_rng());
        self.populate_with(batch).await
    }

    pub async fn populate_with(&self, batch: SeedBatch) -> ServiceResult<SeedSummary> {
        let summary = batch.summary();
        self.store.insert_suppliers(&batch.suppliers).await?;
        self.store.insert_items(&batch.items).await?;
        tracing::info!(
            suppliers = summary.suppliers,
            items = summary.items,
            "database populated"
        );
        Ok(summary)
    }

    async fn lookup_supplier(&self, id: Option<SupplierId>) -> ServiceResult<Option<Supplier>> {
        match id {
            Some(id) => Ok(self.store.get_supplier(id).await?),
            None => Ok(None),
        }
    }

    async fn resolve_one(&self, record: ItemRecord) -> ServiceResult<Item> {
        let supplier = self.lookup_supplier(record.supplier_id).await?;
        Ok(record.resolve(supplier))
    }

    /// Resolve all references with a single batched supplier fetch.
    async fn resolve_many(&self, records: Vec<ItemRecord>) -> ServiceResult<Vec<Item>> {
        let wanted: BTreeSet<SupplierId> = records.iter().filter_map(|r| r.supplier_id).collect();
        let wanted: Vec<SupplierId> = wanted.into_iter().collect();

        let suppliers: HashMap<SupplierId, Supplier> = self
            .store
            .get_suppliers(&wanted)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(records
            .into_iter()
            .map(|r| {
                let supplier = r.supplier_id.and_then(|id| suppliers.get(&id).cloned());
                r.resolve(supplier)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use stockroom_inventory::{SortField, SortOrder};

    fn service() -> InventoryService {
        InventoryService::new(Arc::new(InMemoryStore::new()))
    }

    async fn supplier(svc: &InventoryService, name: &str) -> Supplier {
        svc.create_supplier(SupplierDraft::new(name).with_contact("555-0100"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn list_filters_sorts_and_counts() {
        let svc = service();
        for (name, qty) in [("Apple", 5), ("apricot", 2), ("Banana", 9)] {
            svc.create_item(ItemDraft::new(name, qty)).await.unwrap();
        }

        let listing = svc
            .list_items(
                &ListQuery::new()
                    .filter_name("ap")
                    .sort(SortField::Name, SortOrder::Descending),
            )
            .await
            .unwrap();

        assert_eq!(listing.total_count, 2);
        let rows: Vec<_> = listing
            .items
            .iter()
            .map(|i| (i.name.as_str(), i.quantity))
            .collect();
        assert_eq!(rows, [("apricot", 2), ("Apple", 5)]);
    }

    #[tokio::test]
    async fn default_listing_is_name_ascending() {
        let svc = service();
        for name in ["pear", "Fig", "date"] {
            svc.create_item(ItemDraft::new(name, 1)).await.unwrap();
        }

        let listing = svc.list_items(&ListQuery::new()).await.unwrap();
        let names: Vec<_> = listing.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Fig", "date", "pear"]);
    }

    #[tokio::test]
    async fn list_resolves_suppliers() {
        let svc = service();
        let acme = supplier(&svc, "Acme").await;
        svc.create_item(ItemDraft::new("Bolt", 10).with_supplier(acme.id))
            .await
            .unwrap();
        svc.create_item(ItemDraft::new("Nut", 20)).await.unwrap();

        let listing = svc.list_items(&ListQuery::new()).await.unwrap();
        assert_eq!(listing.items[0].supplier.as_ref(), Some(&acme));
        assert_eq!(listing.items[1].supplier, None);
    }

    #[tokio::test]
    async fn dangling_reference_resolves_to_none() {
        let store = Arc::new(InMemoryStore::new());
        let svc = InventoryService::new(store.clone());
        let record = ItemDraft::new("Orphan", 1).into_record(ItemId::new(), Some(SupplierId::new()));
        store.insert_item(&record).await.unwrap();

        let item = svc.get_item(record.id).await.unwrap();
        assert_eq!(item.supplier, None);
        let listing = svc.list_items(&ListQuery::new()).await.unwrap();
        assert_eq!(listing.items[0].supplier, None);
    }

    #[tokio::test]
    async fn get_missing_item_is_not_found() {
        let err = service().get_item(ItemId::new()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn create_with_unknown_supplier_still_creates_item() {
        let svc = service();
        let item = svc
            .create_item(ItemDraft::new("Widget", 3).with_supplier(SupplierId::new()))
            .await
            .unwrap();
        assert_eq!(item.supplier, None);

        let stored = svc.get_item(item.id).await.unwrap();
        assert_eq!(stored, item);
    }

    #[tokio::test]
    async fn create_rejects_empty_name() {
        let err = service()
            .create_item(ItemDraft::new("   ", 3))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let svc = service();
        let first = supplier(&svc, "First").await;
        let second = supplier(&svc, "Second").await;
        let item = svc
            .create_item(ItemDraft::new("Widget", 3).with_supplier(first.id))
            .await
            .unwrap();

        let updated = svc
            .update_item(item.id, ItemDraft::new("Gadget", -4).with_supplier(second.id))
            .await
            .unwrap();
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.name, "Gadget");
        assert_eq!(updated.quantity, -4);
        assert_eq!(updated.supplier, Some(second));

        // Omitting the supplier clears it.
        let cleared = svc
            .update_item(item.id, ItemDraft::new("Gadget", -4))
            .await
            .unwrap();
        assert_eq!(cleared.supplier, None);
    }

    #[tokio::test]
    async fn update_missing_item_is_not_found() {
        let err = service()
            .update_item(ItemId::new(), ItemDraft::new("Widget", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let svc = service();
        let item = svc.create_item(ItemDraft::new("Widget", 1)).await.unwrap();

        svc.delete_item(item.id).await.unwrap();
        svc.delete_item(item.id).await.unwrap();
        assert!(matches!(
            svc.get_item(item.id).await.unwrap_err(),
            ServiceError::NotFound
        ));
    }

    #[tokio::test]
    async fn populate_links_every_item_to_a_seeded_supplier() {
        let svc = service();
        let summary = svc.populate().await.unwrap();
        assert_eq!(summary.suppliers, 3);
        assert_eq!(summary.items, 1000);

        let listing = svc.list_items(&ListQuery::new()).await.unwrap();
        assert_eq!(listing.total_count, 1000);
        assert!(listing.items.iter().all(|i| i.supplier.is_some()));
        assert!(listing.items.iter().all(|i| (1..=100).contains(&i.quantity)));
        assert_eq!(svc.list_suppliers().await.unwrap().len(), 3);
    }
}
