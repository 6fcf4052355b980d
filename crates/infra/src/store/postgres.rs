//! Postgres-backed record store.
//!
//! ## Schema
//!
//! Two tables, created idempotently by [`PostgresStore::ensure_schema`]:
//!
//! | Table | Columns |
//! |-------|---------|
//! | `suppliers` | `id UUID PK`, `name TEXT`, `address TEXT NULL`, `contact TEXT NULL` |
//! | `inventory_items` | `id UUID PK`, `item_name TEXT`, `quantity BIGINT`, `supplier_id UUID NULL` |
//!
//! `inventory_items.supplier_id` deliberately has no foreign key: references
//! may dangle.
//!
//! ## Ordering
//!
//! Names are ordered with `COLLATE "C"` (byte order) and every listing ends
//! with `id ASC`, matching `ListQuery::compare`.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{instrument, Span};
use uuid::Uuid;

use stockroom_core::{ItemId, SupplierId};
use stockroom_inventory::{ItemRecord, ListQuery, SortField, Supplier};

use super::{RecordStore, StoreError, StoreResult};

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS suppliers (
        id       UUID PRIMARY KEY,
        name     TEXT NOT NULL,
        address  TEXT NULL,
        contact  TEXT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS inventory_items (
        id           UUID PRIMARY KEY,
        item_name    TEXT NOT NULL,
        quantity     BIGINT NOT NULL,
        supplier_id  UUID NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS inventory_items_item_name_idx
        ON inventory_items (item_name COLLATE "C")
    "#,
];

#[derive(Debug, FromRow)]
struct ItemRow {
    id: Uuid,
    item_name: String,
    quantity: i64,
    supplier_id: Option<Uuid>,
}

impl From<ItemRow> for ItemRecord {
    fn from(row: ItemRow) -> Self {
        ItemRecord {
            id: ItemId::from_uuid(row.id),
            name: row.item_name,
            quantity: row.quantity,
            supplier_id: row.supplier_id.map(SupplierId::from_uuid),
        }
    }
}

#[derive(Debug, FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    address: Option<String>,
    contact: Option<String>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: SupplierId::from_uuid(row.id),
            name: row.name,
            address: row.address,
            contact: row.contact,
        }
    }
}

/// Postgres-backed store for items and suppliers.
///
/// Cloning is cheap; the pool is shared.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and make sure the tables exist.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        let pool = PgPool::connect(database_url)
            .await
            .context("failed to connect to Postgres")?;
        let store = Self::new(pool);
        store
            .ensure_schema()
            .await
            .context("failed to create record store schema")?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        }
        Ok(())
    }
}

/// ORDER BY clause for a listing; only allow-listed columns are ever emitted.
fn order_clause(query: &ListQuery) -> String {
    let column = match query.sort_by {
        SortField::Name => r#"item_name COLLATE "C""#,
        SortField::Quantity => "quantity",
        SortField::Id => "id",
    };
    let direction = if query.order.is_descending() { "DESC" } else { "ASC" };
    format!("ORDER BY {column} {direction}, id ASC")
}

fn map_sqlx_error(operation: &'static str, e: sqlx::Error) -> StoreError {
    tracing::warn!(operation, error = %e, "postgres operation failed");
    StoreError::backend(e.to_string())
}

#[async_trait]
impl RecordStore for PostgresStore {
    #[instrument(skip(self), fields(row_count = tracing::field::Empty), err)]
    async fn list_items(&self, query: &ListQuery) -> StoreResult<Vec<ItemRecord>> {
        let sql = format!(
            r#"
            SELECT id, item_name, quantity, supplier_id
            FROM inventory_items
            WHERE ($1::TEXT IS NULL OR strpos(lower(item_name), lower($1)) > 0)
            {}
            "#,
            order_clause(query)
        );

        let rows: Vec<ItemRow> = sqlx::query_as(&sql)
            .bind(query.name_filter.as_ref().map(|f| f.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_items", e))?;

        Span::current().record("row_count", rows.len());
        Ok(rows.into_iter().map(ItemRecord::from).collect())
    }

    #[instrument(skip(self), fields(item_id = %id), err)]
    async fn get_item(&self, id: ItemId) -> StoreResult<Option<ItemRecord>> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, item_name, quantity, supplier_id
            FROM inventory_items
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_item", e))?;

        Ok(row.map(ItemRecord::from))
    }

    #[instrument(skip(self, record), fields(item_id = %record.id), err)]
    async fn insert_item(&self, record: &ItemRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO inventory_items (id, item_name, quantity, supplier_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.name)
        .bind(record.quantity)
        .bind(record.supplier_id.map(Uuid::from))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_item", e))?;

        Ok(())
    }

    #[instrument(skip(self, records), fields(count = records.len()), err)]
    async fn insert_items(&self, records: &[ItemRecord]) -> StoreResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("insert_items", e))?;

        // 4 binds per row; stay well below the 65535 bind limit.
        for chunk in records.chunks(1000) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO inventory_items (id, item_name, quantity, supplier_id) ",
            );
            builder.push_values(chunk, |mut b, r| {
                b.push_bind(*r.id.as_uuid())
                    .push_bind(r.name.clone())
                    .push_bind(r.quantity)
                    .push_bind(r.supplier_id.map(Uuid::from));
            });
            builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("insert_items", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("insert_items", e))
    }

    #[instrument(skip(self, record), fields(item_id = %record.id), err)]
    async fn replace_item(&self, record: &ItemRecord) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET item_name = $2, quantity = $3, supplier_id = $4
            WHERE id = $1
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.name)
        .bind(record.quantity)
        .bind(record.supplier_id.map(Uuid::from))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("replace_item", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(item_id = %id), err)]
    async fn delete_item(&self, id: ItemId) -> StoreResult<()> {
        sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_item", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(supplier_id = %id), err)]
    async fn get_supplier(&self, id: SupplierId) -> StoreResult<Option<Supplier>> {
        let row: Option<SupplierRow> = sqlx::query_as(
            "SELECT id, name, address, contact FROM suppliers WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_supplier", e))?;

        Ok(row.map(Supplier::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_suppliers(&self, ids: &[SupplierId]) -> StoreResult<Vec<Supplier>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<SupplierRow> = sqlx::query_as(
            "SELECT id, name, address, contact FROM suppliers WHERE id = ANY($1)",
        )
        .bind(uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_suppliers", e))?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    #[instrument(skip(self), err)]
    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>> {
        let rows: Vec<SupplierRow> = sqlx::query_as(
            r#"
            SELECT id, name, address, contact
            FROM suppliers
            ORDER BY name COLLATE "C" ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_suppliers", e))?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    #[instrument(skip(self, suppliers), fields(count = suppliers.len()), err)]
    async fn insert_suppliers(&self, suppliers: &[Supplier]) -> StoreResult<()> {
        if suppliers.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO suppliers (id, name, address, contact) ");
        builder.push_values(suppliers, |mut b, s| {
            b.push_bind(*s.id.as_uuid())
                .push_bind(s.name.clone())
                .push_bind(s.address.clone())
                .push_bind(s.contact.clone());
        });
        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_suppliers", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_inventory::SortOrder;

    #[test]
    fn default_order_is_binary_name_ascending_then_id() {
        assert_eq!(
            order_clause(&ListQuery::new()),
            r#"ORDER BY item_name COLLATE "C" ASC, id ASC"#
        );
    }

    #[test]
    fn descending_quantity_keeps_id_tiebreak_ascending() {
        let q = ListQuery::new().sort(SortField::Quantity, SortOrder::Descending);
        assert_eq!(order_clause(&q), "ORDER BY quantity DESC, id ASC");
    }
}
