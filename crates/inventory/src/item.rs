use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ItemId, SupplierId};

use crate::supplier::Supplier;

/// Stored form of an inventory item: the supplier is kept as a bare reference.
///
/// The reference is not guaranteed to resolve; suppliers can be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
    pub supplier_id: Option<SupplierId>,
}

impl Entity for ItemRecord {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl ItemRecord {
    /// Replace the supplier reference with the full record (or nothing).
    pub fn resolve(self, supplier: Option<Supplier>) -> Item {
        Item {
            id: self.id,
            name: self.name,
            quantity: self.quantity,
            supplier,
        }
    }
}

/// An inventory item with its supplier reference resolved.
///
/// This is the shape returned to callers; field names follow the document
/// layout clients already consume (`_id`, `itemName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: ItemId,
    #[serde(rename = "itemName")]
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub supplier: Option<Supplier>,
}

/// Full field set for creating or replacing an item.
///
/// `supplier_id` is whatever the caller asked for; it is resolved against the
/// store before the record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: i64,
    pub supplier_id: Option<SupplierId>,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
            supplier_id: None,
        }
    }

    pub fn with_supplier(mut self, supplier_id: SupplierId) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    /// Quantity is accepted as-is (any sign); only the name is checked.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("itemName cannot be empty"));
        }
        Ok(())
    }

    /// Build the stored record using the already-resolved supplier id.
    pub fn into_record(self, id: ItemId, resolved_supplier: Option<SupplierId>) -> ItemRecord {
        ItemRecord {
            id,
            name: self.name,
            quantity: self.quantity,
            supplier_id: resolved_supplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supplier::SupplierDraft;

    #[test]
    fn validate_rejects_empty_name() {
        let err = ItemDraft::new("", 3).validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn validate_accepts_negative_quantity() {
        ItemDraft::new("Widget", -7).validate().unwrap();
    }

    #[test]
    fn into_record_uses_resolved_supplier_not_requested_one() {
        let requested = SupplierId::new();
        let record = ItemDraft::new("Widget", 1)
            .with_supplier(requested)
            .into_record(ItemId::new(), None);
        assert_eq!(record.supplier_id, None);
    }

    #[test]
    fn resolved_item_serializes_with_document_field_names() {
        let supplier = SupplierDraft::new("Supplier B").into_supplier(SupplierId::new());
        let record = ItemDraft::new("Apple", 5).into_record(ItemId::new(), Some(supplier.id));
        let item = record.clone().resolve(Some(supplier.clone()));

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["_id"], record.id.to_string());
        assert_eq!(json["itemName"], "Apple");
        assert_eq!(json["quantity"], 5);
        assert_eq!(json["supplier"]["name"], "Supplier B");
    }

    #[test]
    fn unresolved_supplier_serializes_as_null() {
        let item = ItemDraft::new("Apple", 5)
            .into_record(ItemId::new(), None)
            .resolve(None);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json["supplier"].is_null());
    }
}
