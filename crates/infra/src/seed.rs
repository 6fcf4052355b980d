//! Synthetic data for demos and load checks.

use rand::Rng;

use stockroom_core::{ItemId, SupplierId};
use stockroom_inventory::{ItemDraft, ItemRecord, Supplier, SupplierDraft};

pub const SEED_ITEM_COUNT: usize = 1000;
pub const SEED_SUPPLIER_NAMES: [&str; 3] = ["Supplier A", "Supplier B", "Supplier C"];

/// Records to insert; built up front so no RNG is held across awaits.
#[derive(Debug, Clone)]
pub struct SeedBatch {
    pub suppliers: Vec<Supplier>,
    pub items: Vec<ItemRecord>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub suppliers: usize,
    pub items: usize,
}

impl SeedBatch {
    /// Items `Item 1..=1000`, quantity uniform in `1..=100`, each linked to a
    /// uniformly chosen seeded supplier.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let suppliers: Vec<Supplier> = SEED_SUPPLIER_NAMES
            .iter()
            .map(|name| {
                SupplierDraft::new(*name)
                    .with_address("Random Address")
                    .with_contact("Random Contact")
                    .into_supplier(SupplierId::new())
            })
            .collect();

        let items = (0..SEED_ITEM_COUNT)
            .map(|i| {
                let quantity = rng.gen_range(1..=100);
                let supplier = &suppliers[rng.gen_range(0..suppliers.len())];
                ItemDraft::new(format!("Item {}", i + 1), quantity)
                    .into_record(ItemId::new(), Some(supplier.id))
            })
            .collect();

        Self { suppliers, items }
    }

    pub fn summary(&self) -> SeedSummary {
        SeedSummary {
            suppliers: self.suppliers.len(),
            items: self.items.len(),
        }
    }
}
