//! View model for the inventory page.
//!
//! State changes are synchronous (`begin_*`/`finish_*`) so a UI can apply
//! them between awaits; the async methods drive a whole round trip for
//! callers that own the view outright.

use stockroom_core::ItemId;
use stockroom_inventory::{Item, NameFilter};

use crate::api::{ClientError, InventoryApi, NewItem};
use crate::pagination;

pub const FETCH_ERROR_MESSAGE: &str = "Error fetching inventory";

/// Contents of the "add item" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub item_name: String,
    pub quantity: i64,
}

impl ItemForm {
    /// Non-numeric input leaves the previous value in place.
    pub fn set_quantity_text(&mut self, raw: &str) {
        if let Ok(n) = raw.trim().parse::<i64>() {
            self.quantity = n;
        }
    }

    pub fn to_new_item(&self) -> NewItem {
        NewItem {
            item_name: self.item_name.clone(),
            quantity: self.quantity,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InventoryView {
    original: Vec<Item>,
    visible: Vec<Item>,
    search_term: String,
    current_page: usize,
    selected: Option<Item>,
    error: Option<String>,
    is_loading: bool,
    pub draft: ItemForm,
}

impl InventoryView {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            ..Default::default()
        }
    }

    pub fn visible(&self) -> &[Item] {
        &self.visible
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.visible.len())
    }

    pub fn page_size(&self) -> usize {
        pagination::page_size(self.visible.len())
    }

    /// Page controls only make sense with more than one page.
    pub fn shows_page_controls(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn current_items(&self) -> &[Item] {
        pagination::page_slice(&self.visible, self.current_page)
    }

    pub fn selected(&self) -> Option<&Item> {
        self.selected.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Filter the fetched list by the search term and go back to page 1.
    pub fn find(&mut self) {
        self.visible = match NameFilter::new(self.search_term.as_str()) {
            Some(filter) => self
                .original
                .iter()
                .filter(|item| filter.matches(&item.name))
                .cloned()
                .collect(),
            None => self.original.clone(),
        };
        self.current_page = 1;
    }

    pub fn reset_search(&mut self) {
        self.search_term.clear();
        self.visible = self.original.clone();
        self.current_page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = pagination::clamp_page(page, self.visible.len());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    pub fn begin_load(&mut self) {
        self.is_loading = true;
    }

    /// Replace the list with a fresh fetch; a failure only sets the error
    /// text and keeps what was shown before.
    pub fn finish_load(&mut self, result: Result<Vec<Item>, ClientError>) {
        self.is_loading = false;
        match result {
            Ok(items) => {
                self.error = None;
                self.visible = items.clone();
                self.original = items;
                self.current_page = pagination::clamp_page(self.current_page, self.visible.len());
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch inventory");
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    pub fn finish_select(&mut self, result: Result<Item, ClientError>) {
        match result {
            Ok(item) => self.selected = Some(item),
            Err(e) => tracing::error!(error = %e, "failed to fetch item"),
        }
    }

    /// Returns whether the list should be re-fetched.
    pub fn finish_add(&mut self, result: Result<Item, ClientError>) -> bool {
        match result {
            Ok(_) => {
                self.draft = ItemForm::default();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to add item");
                false
            }
        }
    }

    /// Returns whether the list should be re-fetched.
    pub fn finish_delete(&mut self, id: ItemId, result: Result<(), ClientError>) -> bool {
        match result {
            Ok(()) => {
                if self.selected.as_ref().is_some_and(|s| s.id == id) {
                    self.selected = None;
                }
                true
            }
            Err(e) => {
                tracing::error!(error = %e, item_id = %id, "failed to delete item");
                false
            }
        }
    }

    pub async fn load<A: InventoryApi + ?Sized>(&mut self, api: &A) {
        self.begin_load();
        let result = api.list_items().await;
        self.finish_load(result);
    }

    /// Fetches the item again rather than reusing the listed row.
    pub async fn select<A: InventoryApi + ?Sized>(&mut self, api: &A, id: ItemId) {
        let result = api.get_item(id).await;
        self.finish_select(result);
    }

    pub async fn add_item<A: InventoryApi + ?Sized>(&mut self, api: &A) {
        let result = api.add_item(&self.draft.to_new_item()).await;
        if self.finish_add(result) {
            self.load(api).await;
        }
    }

    pub async fn delete_item<A: InventoryApi + ?Sized>(&mut self, api: &A, id: ItemId) {
        let result = api.delete_item(id).await;
        if self.finish_delete(id, result) {
            self.load(api).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct FakeApi {
        items: Mutex<Vec<Item>>,
        fail_list: bool,
        fail_writes: bool,
        get_calls: Mutex<usize>,
    }

    impl FakeApi {
        fn with_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
            let items = names
                .into_iter()
                .enumerate()
                .map(|(i, name)| item(name, i as i64))
                .collect();
            Self {
                items: Mutex::new(items),
                ..Default::default()
            }
        }
    }

    fn item(name: &str, quantity: i64) -> Item {
        Item {
            id: ItemId::new(),
            name: name.to_string(),
            quantity,
            supplier: None,
        }
    }

    fn failure() -> ClientError {
        ClientError::Network("connection refused".into())
    }

    #[async_trait(?Send)]
    impl InventoryApi for FakeApi {
        async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
            if self.fail_list {
                return Err(failure());
            }
            Ok(self.items.lock().unwrap().clone())
        }

        async fn get_item(&self, id: ItemId) -> Result<Item, ClientError> {
            *self.get_calls.lock().unwrap() += 1;
            self.items
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .ok_or(ClientError::Api(404, "Inventory item not found".into()))
        }

        async fn add_item(&self, new: &NewItem) -> Result<Item, ClientError> {
            if self.fail_writes {
                return Err(failure());
            }
            let created = item(&new.item_name, new.quantity);
            self.items.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn delete_item(&self, id: ItemId) -> Result<(), ClientError> {
            if self.fail_writes {
                return Err(failure());
            }
            self.items.lock().unwrap().retain(|i| i.id != id);
            Ok(())
        }
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[tokio::test]
    async fn twenty_five_items_paginate_in_twenties() {
        let labels: Vec<String> = (1..=25).map(|i| format!("Item {i}")).collect();
        let api = FakeApi::with_names(labels.iter().map(String::as_str));
        let mut view = InventoryView::new();

        view.load(&api).await;

        assert_eq!(view.page_size(), 20);
        assert_eq!(view.total_pages(), 2);
        assert!(view.shows_page_controls());
        assert_eq!(view.current_items().len(), 20);
        assert_eq!(view.current_items()[0].name, "Item 1");

        view.go_to_page(2);
        assert_eq!(view.current_items().len(), 5);
        assert_eq!(view.current_items()[4].name, "Item 25");

        view.go_to_page(7);
        assert_eq!(view.current_page(), 2);
    }

    #[tokio::test]
    async fn search_filters_and_reset_restores() {
        let api = FakeApi::with_names(["Apple", "Banana", "apricot"]);
        let mut view = InventoryView::new();
        view.load(&api).await;

        view.set_search_term("AP");
        view.find();
        assert_eq!(names(view.visible()), ["Apple", "apricot"]);
        assert_eq!(view.current_page(), 1);
        assert!(!view.shows_page_controls());

        view.reset_search();
        assert_eq!(view.search_term(), "");
        assert_eq!(names(view.visible()), ["Apple", "Banana", "apricot"]);
        assert_eq!(view.current_page(), 1);
    }

    #[tokio::test]
    async fn search_returns_to_first_page() {
        let labels: Vec<String> = (1..=30).map(|i| format!("Item {i}")).collect();
        let api = FakeApi::with_names(labels.iter().map(String::as_str));
        let mut view = InventoryView::new();
        view.load(&api).await;
        view.go_to_page(2);

        view.set_search_term("Item 1");
        view.find();

        assert_eq!(view.current_page(), 1);
        assert_eq!(view.visible().len(), 11);
        assert_eq!(view.page_size(), 11);
    }

    #[tokio::test]
    async fn list_failure_sets_inline_error() {
        let api = FakeApi {
            fail_list: true,
            ..Default::default()
        };
        let mut view = InventoryView::new();
        view.load(&api).await;

        assert_eq!(view.error(), Some(FETCH_ERROR_MESSAGE));
        assert!(!view.is_loading());
        assert!(view.visible().is_empty());
    }

    #[tokio::test]
    async fn add_refetches_and_clears_the_form() {
        let api = FakeApi::default();
        let mut view = InventoryView::new();
        view.load(&api).await;

        view.draft.item_name = "Gear".into();
        view.draft.set_quantity_text("7");
        view.add_item(&api).await;

        assert_eq!(names(view.visible()), ["Gear"]);
        assert_eq!(view.visible()[0].quantity, 7);
        assert_eq!(view.draft, ItemForm::default());
    }

    #[tokio::test]
    async fn failed_writes_are_not_shown() {
        let api = FakeApi {
            fail_writes: true,
            ..FakeApi::with_names(["Bolt"])
        };
        let mut view = InventoryView::new();
        view.load(&api).await;

        view.draft.item_name = "Nut".into();
        view.add_item(&api).await;
        let id = view.visible()[0].id;
        view.delete_item(&api, id).await;

        assert_eq!(view.error(), None);
        assert_eq!(view.draft.item_name, "Nut");
        assert_eq!(names(view.visible()), ["Bolt"]);
    }

    #[tokio::test]
    async fn delete_refetches_and_clears_selection() {
        let api = FakeApi::with_names(["Bolt", "Nut"]);
        let mut view = InventoryView::new();
        view.load(&api).await;
        let id = view.visible()[0].id;

        view.select(&api, id).await;
        assert_eq!(view.selected().map(|i| i.name.as_str()), Some("Bolt"));
        assert_eq!(*api.get_calls.lock().unwrap(), 1);

        view.delete_item(&api, id).await;
        assert!(view.selected().is_none());
        assert_eq!(names(view.visible()), ["Nut"]);
    }

    #[test]
    fn quantity_text_ignores_garbage() {
        let mut form = ItemForm::default();
        form.set_quantity_text("12");
        form.set_quantity_text("twelve");
        assert_eq!(form.quantity, 12);
    }
}
