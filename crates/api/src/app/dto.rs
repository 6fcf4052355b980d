use serde::Deserialize;

use stockroom_core::{DomainError, DomainResult, SupplierId};
use stockroom_inventory::{
    parse_sort_field, ItemDraft, ListQuery, SortOrder, SupplierDraft,
};

// -------------------------
// Request DTOs
// -------------------------

/// Body of create and update requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub item_name: String,
    pub quantity: QuantityInput,
    #[serde(default)]
    pub supplier_id: Option<String>,
}

/// Quantity as sent by clients: a JSON integer or a string holding one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(i64),
    Text(String),
}

impl QuantityInput {
    pub fn to_i64(&self) -> DomainResult<i64> {
        match self {
            QuantityInput::Number(n) => Ok(*n),
            QuantityInput::Text(s) => s.trim().parse().map_err(|_| {
                DomainError::validation(format!("quantity must be an integer, got {s:?}"))
            }),
        }
    }
}

impl ItemRequest {
    /// Unparseable supplier ids are treated like unknown ones: dropped.
    pub fn into_draft(self) -> DomainResult<ItemDraft> {
        let quantity = self.quantity.to_i64()?;
        let mut draft = ItemDraft::new(self.item_name, quantity);
        if let Some(id) = self
            .supplier_id
            .as_deref()
            .and_then(|raw| raw.parse::<SupplierId>().ok())
        {
            draft = draft.with_supplier(id);
        }
        Ok(draft)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    pub address: Option<String>,
    pub contact: Option<String>,
}

impl From<CreateSupplierRequest> for SupplierDraft {
    fn from(body: CreateSupplierRequest) -> Self {
        SupplierDraft {
            name: body.name,
            address: body.address,
            contact: body.contact,
        }
    }
}

// -------------------------
// Query params
// -------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInventoryParams {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub item_name: Option<String>,
}

impl ListInventoryParams {
    pub fn to_query(&self) -> DomainResult<ListQuery> {
        let sort_by = parse_sort_field(self.sort_by.as_deref())?;
        let order = self
            .sort_order
            .as_deref()
            .map(SortOrder::parse_lenient)
            .unwrap_or_default();

        let mut query = ListQuery::new().sort(sort_by, order);
        if let Some(needle) = &self.item_name {
            query = query.filter_name(needle.as_str());
        }
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_inventory::SortField;

    fn item_request(json: serde_json::Value) -> ItemRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn quantity_accepts_numeric_strings() {
        let draft = item_request(serde_json::json!({"itemName": "Bolt", "quantity": " 12 "}))
            .into_draft()
            .unwrap();
        assert_eq!(draft.quantity, 12);
    }

    #[test]
    fn quantity_rejects_non_numeric_strings() {
        let err = item_request(serde_json::json!({"itemName": "Bolt", "quantity": "lots"}))
            .into_draft()
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn malformed_supplier_id_is_dropped() {
        let draft = item_request(serde_json::json!({
            "itemName": "Bolt",
            "quantity": 3,
            "supplierId": "not-a-uuid",
        }))
        .into_draft()
        .unwrap();
        assert_eq!(draft.supplier_id, None);
    }

    #[test]
    fn list_params_default_to_name_ascending() {
        let query = ListInventoryParams::default().to_query().unwrap();
        assert_eq!(query.sort_by, SortField::Name);
        assert_eq!(query.order, SortOrder::Ascending);
        assert!(query.name_filter.is_none());
    }

    #[test]
    fn list_params_reject_unknown_sort_field() {
        let params = ListInventoryParams {
            sort_by: Some("price".into()),
            ..Default::default()
        };
        assert!(params.to_query().is_err());
    }
}
