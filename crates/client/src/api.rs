//! HTTP bindings for the inventory endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use stockroom_core::ItemId;
use stockroom_inventory::Item;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Body posted when adding an item from the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub item_name: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    inventory: Vec<Item>,
}

/// Operations the view model needs from the backend.
///
/// Not `Send`: browser futures are single-threaded.
#[async_trait(?Send)]
pub trait InventoryApi {
    async fn list_items(&self) -> Result<Vec<Item>, ClientError>;
    async fn get_item(&self, id: ItemId) -> Result<Item, ClientError>;
    async fn add_item(&self, item: &NewItem) -> Result<Item, ClientError>;
    async fn delete_item(&self, id: ItemId) -> Result<(), ClientError>;
}

/// `reqwest`-backed client; works natively and in the browser.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(ClientError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ))
        }
    }
}

fn network(e: reqwest::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

fn parse(e: reqwest::Error) -> ClientError {
    ClientError::Parse(e.to_string())
}

#[async_trait(?Send)]
impl InventoryApi for ApiClient {
    async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        let resp = self
            .http
            .get(self.url("/inventory"))
            .send()
            .await
            .map_err(network)?;
        let body: ListResponse = Self::check(resp).await?.json().await.map_err(parse)?;
        Ok(body.inventory)
    }

    async fn get_item(&self, id: ItemId) -> Result<Item, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/inventory/{id}")))
            .send()
            .await
            .map_err(network)?;
        Self::check(resp).await?.json().await.map_err(parse)
    }

    async fn add_item(&self, item: &NewItem) -> Result<Item, ClientError> {
        let resp = self
            .http
            .post(self.url("/inventory"))
            .json(item)
            .send()
            .await
            .map_err(network)?;
        Self::check(resp).await?.json().await.map_err(parse)
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/inventory/{id}")))
            .send()
            .await
            .map_err(network)?;
        Self::check(resp).await?;
        Ok(())
    }
}
