//! Item resource: record store contract, its backends, and the service façade.

pub mod document;
pub mod repository;
pub mod service;

use std::sync::Arc;

use configs::{DatabaseConfig, StoreBackend};
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::json_document_store::JsonDocumentStore;
use repository::{ItemRepository, SeaOrmItemRepository};

/// Open the record store selected by `cfg.url`.
pub async fn open_repository(cfg: &DatabaseConfig) -> Result<Arc<dyn ItemRepository>, ServiceError> {
    let backend = cfg.backend().map_err(|e| ServiceError::Storage(e.to_string()))?;
    match backend {
        StoreBackend::Postgres => {
            let db = models::db::connect_with_config(cfg)
                .await
                .map_err(|e| ServiceError::Db(e.to_string()))?;
            info!(backend = "postgres", "item store opened");
            Ok(Arc::new(SeaOrmItemRepository { db }))
        }
        StoreBackend::JsonFile(path) => {
            let store = JsonDocumentStore::<models::item::Item>::new(path.clone()).await?;
            info!(backend = "json_file", path = %path.display(), "item store opened");
            Ok(store)
        }
    }
}
