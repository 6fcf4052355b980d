//! Inventory domain module.
//!
//! This crate contains the records (items, suppliers) and the listing query
//! contract (name filter, sort field/direction), implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod item;
pub mod query;
pub mod supplier;

pub use item::{Item, ItemDraft, ItemRecord};
pub use query::{parse_sort_field, ListQuery, NameFilter, SortField, SortOrder};
pub use supplier::{Supplier, SupplierDraft};
