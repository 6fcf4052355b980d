use std::sync::Arc;

use stockroom_infra::{AppConfig, InMemoryStore, InventoryService, PostgresStore, RecordStore};

/// Handles shared by every request; built once at startup.
#[derive(Clone)]
pub struct AppServices {
    inventory: InventoryService,
}

impl AppServices {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            inventory: InventoryService::new(store),
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    pub fn inventory(&self) -> &InventoryService {
        &self.inventory
    }
}

/// Pick the store from configuration: Postgres when `DATABASE_URL` is set,
/// otherwise in-memory.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    match config.database_url.as_deref() {
        Some(url) => {
            let store = PostgresStore::connect(url).await?;
            tracing::info!("using postgres record store");
            Ok(AppServices::new(Arc::new(store)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; falling back to in-memory record store");
            Ok(AppServices::in_memory())
        }
    }
}
