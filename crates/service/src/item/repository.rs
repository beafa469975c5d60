use async_trait::async_trait;
use models::item::{Item, ItemFields};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Record store contract for items.
///
/// Absence is a value, not an error: lookups, replacements, and deletions of
/// an unknown id yield `None`. A string that cannot be an id yields
/// [`ServiceError::InvalidId`].
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Every stored item, in store-defined order.
    async fn find_all(&self) -> Result<Vec<Item>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Item>, ServiceError>;
    /// Persist a new item under a fresh id.
    async fn insert(&self, fields: ItemFields) -> Result<Item, ServiceError>;
    /// Replace all fields of an item; returns the new state.
    async fn update_by_id(&self, id: &str, fields: ItemFields) -> Result<Option<Item>, ServiceError>;
    /// Remove an item; returns it as it was just before removal.
    async fn delete_by_id(&self, id: &str) -> Result<Option<Item>, ServiceError>;
}

pub(crate) fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id.trim()).map_err(|_| ServiceError::InvalidId(id.to_string()))
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmItemRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn find_all(&self) -> Result<Vec<Item>, ServiceError> {
        let rows = models::item::find_all(&self.db).await?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Item>, ServiceError> {
        let id = parse_id(id)?;
        Ok(models::item::find(&self.db, id).await?.map(Item::from))
    }

    async fn insert(&self, fields: ItemFields) -> Result<Item, ServiceError> {
        Ok(models::item::create(&self.db, fields).await?.into())
    }

    async fn update_by_id(&self, id: &str, fields: ItemFields) -> Result<Option<Item>, ServiceError> {
        let id = parse_id(id)?;
        Ok(models::item::replace(&self.db, id, fields).await?.map(Item::from))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Item>, ServiceError> {
        let id = parse_id(id)?;
        Ok(models::item::remove(&self.db, id).await?.map(Item::from))
    }
}
