use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use stockroom_core::{Entity, ItemId, SupplierId};
use stockroom_inventory::{ItemRecord, ListQuery, Supplier};

use super::{RecordStore, StoreError, StoreResult};

/// Id-keyed table of one entity kind.
#[derive(Debug)]
struct Table<E: Entity> {
    rows: RwLock<HashMap<E::Id, E>>,
}

impl<E> Table<E>
where
    E: Entity + Clone,
{
    fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    fn get(&self, id: &E::Id) -> StoreResult<Option<E>> {
        let map = self.rows.read().map_err(|_| poisoned())?;
        Ok(map.get(id).cloned())
    }

    fn all(&self) -> StoreResult<Vec<E>> {
        let map = self.rows.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }

    fn insert_many<'a>(&self, rows: impl IntoIterator<Item = &'a E>) -> StoreResult<()>
    where
        E: 'a,
    {
        let mut map = self.rows.write().map_err(|_| poisoned())?;
        for row in rows {
            map.insert(*row.id(), row.clone());
        }
        Ok(())
    }

    fn replace(&self, row: &E) -> StoreResult<bool> {
        let mut map = self.rows.write().map_err(|_| poisoned())?;
        match map.get_mut(row.id()) {
            Some(existing) => {
                *existing = row.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&self, id: &E::Id) -> StoreResult<()> {
        let mut map = self.rows.write().map_err(|_| poisoned())?;
        map.remove(id);
        Ok(())
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("in-memory store lock poisoned")
}

/// In-memory record store for tests/dev.
#[derive(Debug)]
pub struct InMemoryStore {
    items: Table<ItemRecord>,
    suppliers: Table<Supplier>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            items: Table::new(),
            suppliers: Table::new(),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_items(&self, query: &ListQuery) -> StoreResult<Vec<ItemRecord>> {
        Ok(query.apply(self.items.all()?))
    }

    async fn get_item(&self, id: ItemId) -> StoreResult<Option<ItemRecord>> {
        self.items.get(&id)
    }

    async fn insert_item(&self, record: &ItemRecord) -> StoreResult<()> {
        self.items.insert_many([record])
    }

    async fn insert_items(&self, records: &[ItemRecord]) -> StoreResult<()> {
        self.items.insert_many(records)
    }

    async fn replace_item(&self, record: &ItemRecord) -> StoreResult<bool> {
        self.items.replace(record)
    }

    async fn delete_item(&self, id: ItemId) -> StoreResult<()> {
        self.items.remove(&id)
    }

    async fn get_supplier(&self, id: SupplierId) -> StoreResult<Option<Supplier>> {
        self.suppliers.get(&id)
    }

    async fn get_suppliers(&self, ids: &[SupplierId]) -> StoreResult<Vec<Supplier>> {
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(s) = self.suppliers.get(id)? {
                out.push(s);
            }
        }
        Ok(out)
    }

    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>> {
        let mut all = self.suppliers.all()?;
        all.sort_by(|a, b| {
            a.name
                .as_bytes()
                .cmp(b.name.as_bytes())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(all)
    }

    async fn insert_suppliers(&self, suppliers: &[Supplier]) -> StoreResult<()> {
        self.suppliers.insert_many(suppliers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_inventory::{ItemDraft, SortField, SortOrder, SupplierDraft};

    fn item(name: &str, quantity: i64) -> ItemRecord {
        ItemDraft::new(name, quantity).into_record(ItemId::new(), None)
    }

    #[tokio::test]
    async fn list_applies_filter_and_order() {
        let store = InMemoryStore::new();
        store
            .insert_items(&[item("Banana", 9), item("Apple", 5), item("apricot", 2)])
            .await
            .unwrap();

        let query = ListQuery::new()
            .filter_name("ap")
            .sort(SortField::Quantity, SortOrder::Descending);
        let out = store.list_items(&query).await.unwrap();

        let names: Vec<_> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Apple", "apricot"]);
    }

    #[tokio::test]
    async fn replace_reports_missing_rows() {
        let store = InMemoryStore::new();
        let record = item("Widget", 1);
        assert!(!store.replace_item(&record).await.unwrap());

        store.insert_item(&record).await.unwrap();
        let mut changed = record.clone();
        changed.quantity = 40;
        assert!(store.replace_item(&changed).await.unwrap());
        assert_eq!(store.get_item(record.id).await.unwrap().unwrap().quantity, 40);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_ok() {
        let store = InMemoryStore::new();
        store.delete_item(ItemId::new()).await.unwrap();
    }

    #[tokio::test]
    async fn get_suppliers_skips_unknown_ids() {
        let store = InMemoryStore::new();
        let known = SupplierDraft::new("Supplier A").into_supplier(SupplierId::new());
        store.insert_suppliers(&[known.clone()]).await.unwrap();

        let found = store
            .get_suppliers(&[known.id, SupplierId::new()])
            .await
            .unwrap();
        assert_eq!(found, vec![known]);
    }
}
