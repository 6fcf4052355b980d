//! Listing query contract: name filter, sort field and direction.
//!
//! Stores that can push the query down (SQL) must produce the same order as
//! [`ListQuery::compare`]; stores that cannot simply call [`ListQuery::apply`].

use core::cmp::Ordering;
use core::str::FromStr;

use stockroom_core::{DomainError, DomainResult};

use crate::item::ItemRecord;

/// Sortable item fields.
///
/// Only these fields can be sorted on; anything else is rejected up front.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Quantity,
    Id,
}

impl SortField {
    /// Wire name of the field, as accepted in `sortBy`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "itemName",
            SortField::Quantity => "quantity",
            SortField::Id => "_id",
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "itemName" | "name" => Ok(SortField::Name),
            "quantity" => Ok(SortField::Quantity),
            "_id" | "id" => Ok(SortField::Id),
            other => Err(DomainError::validation(format!(
                "cannot sort by '{other}'; expected one of: itemName, quantity, _id"
            ))),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// `desc` (any case) means descending; every other value is ascending.
    pub fn parse_lenient(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, SortOrder::Descending)
    }
}

/// Case-insensitive literal substring filter on item names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter {
    raw: String,
    lowered: String,
}

impl NameFilter {
    /// Returns `None` for an empty needle: an empty filter selects everything.
    pub fn new(needle: impl Into<String>) -> Option<Self> {
        let raw = needle.into();
        if raw.is_empty() {
            return None;
        }
        let lowered = raw.to_lowercase();
        Some(Self { raw, lowered })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.lowered)
    }
}

/// Parameters of the "list items" operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub name_filter: Option<NameFilter>,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_name(mut self, needle: impl Into<String>) -> Self {
        self.name_filter = NameFilter::new(needle);
        self
    }

    pub fn sort(mut self, sort_by: SortField, order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.order = order;
        self
    }

    pub fn matches(&self, record: &ItemRecord) -> bool {
        self.name_filter
            .as_ref()
            .is_none_or(|f| f.matches(&record.name))
    }

    /// Total order used for listing.
    ///
    /// Names compare byte-wise (binary collation), so `"Apple" < "apricot"`.
    /// Ties on the sort field fall back to id ascending regardless of
    /// direction.
    pub fn compare(&self, a: &ItemRecord, b: &ItemRecord) -> Ordering {
        let primary = match self.sort_by {
            SortField::Name => a.name.as_bytes().cmp(b.name.as_bytes()),
            SortField::Quantity => a.quantity.cmp(&b.quantity),
            SortField::Id => a.id.cmp(&b.id),
        };
        let primary = if self.order.is_descending() {
            primary.reverse()
        } else {
            primary
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }

    /// Filter and order an unsorted set of records.
    pub fn apply(&self, records: impl IntoIterator<Item = ItemRecord>) -> Vec<ItemRecord> {
        let mut out: Vec<ItemRecord> = records.into_iter().filter(|r| self.matches(r)).collect();
        out.sort_by(|a, b| self.compare(a, b));
        out
    }
}

/// Parse an optional `sortBy` value, defaulting to the name field.
pub fn parse_sort_field(raw: Option<&str>) -> DomainResult<SortField> {
    match raw {
        None | Some("") => Ok(SortField::default()),
        Some(s) => s.parse(),
    }
}
