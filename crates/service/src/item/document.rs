//! Item record store on top of the JSON document collection.

use async_trait::async_trait;
use models::item::{Item, ItemFields};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::item::repository::{parse_id, ItemRepository};
use crate::storage::json_document_store::{Document, JsonDocumentStore};

impl Document for Item {
    fn id(&self) -> &str { &self.id }
}

#[async_trait]
impl ItemRepository for JsonDocumentStore<Item> {
    async fn find_all(&self) -> Result<Vec<Item>, ServiceError> {
        Ok(self.all().await)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Item>, ServiceError> {
        let id = parse_id(id)?.to_string();
        Ok(self.find(&id).await)
    }

    async fn insert(&self, fields: ItemFields) -> Result<Item, ServiceError> {
        let item = Item::new(Uuid::new_v4(), fields);
        self.push(item.clone()).await?;
        Ok(item)
    }

    async fn update_by_id(&self, id: &str, fields: ItemFields) -> Result<Option<Item>, ServiceError> {
        let id = parse_id(id)?.to_string();
        self.modify(&id, |item| item.fields = fields).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Item>, ServiceError> {
        let id = parse_id(id)?.to_string();
        self.remove(&id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_matched_in_canonical_form() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("items_doc_{}.json", Uuid::new_v4()));
        let store = JsonDocumentStore::<Item>::new(&tmp).await?;
        let created = store.insert(ItemFields { name: Some("x".into()), ..Default::default() }).await?;

        let upper = created.id.to_uppercase();
        assert_eq!(store.find_by_id(&upper).await?, Some(created.clone()));
        assert!(store.delete_by_id(&upper).await?.is_some());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
