use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, SupplierId};

/// A vendor record linked from zero or more items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(rename = "_id")]
    pub id: SupplierId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for registering a supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierDraft {
    pub name: String,
    pub address: Option<String>,
    pub contact: Option<String>,
}

impl SupplierDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            contact: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("supplier name cannot be empty"));
        }
        Ok(())
    }

    /// Assign an identifier, producing the record to persist.
    pub fn into_supplier(self, id: SupplierId) -> Supplier {
        Supplier {
            id,
            name: self.name,
            address: self.address,
            contact: self.contact,
        }
    }
}
