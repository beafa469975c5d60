use std::sync::Arc;

use models::item::{Item, ItemFields};
use tracing::instrument;

use crate::errors::ServiceError;
use crate::item::repository::ItemRepository;

/// Application service for items: one store call per operation, results and
/// errors passed through untouched.
pub struct ItemService<R: ItemRepository + ?Sized = dyn ItemRepository> {
    repo: Arc<R>,
}

impl<R: ItemRepository + ?Sized> ItemService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Item>, ServiceError> { self.repo.find_all().await }

    #[instrument(skip(self))]
    pub async fn get_one(&self, id: &str) -> Result<Option<Item>, ServiceError> { self.repo.find_by_id(id).await }

    #[instrument(skip(self, fields))]
    pub async fn create(&self, fields: ItemFields) -> Result<Item, ServiceError> { self.repo.insert(fields).await }

    #[instrument(skip(self, fields))]
    pub async fn update(&self, id: &str, fields: ItemFields) -> Result<Option<Item>, ServiceError> {
        self.repo.update_by_id(id, fields).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Option<Item>, ServiceError> { self.repo.delete_by_id(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json_document_store::JsonDocumentStore;
    use std::collections::HashSet;
    use uuid::Uuid;

    async fn file_service() -> Result<(ItemService, std::path::PathBuf), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("item_service_{}.json", Uuid::new_v4()));
        let repo: Arc<dyn ItemRepository> = JsonDocumentStore::<Item>::new(&tmp).await?;
        Ok((ItemService::new(repo), tmp))
    }

    fn fields(name: &str, desc: &str, qty: f64) -> ItemFields {
        ItemFields { name: Some(name.into()), desc: Some(desc.into()), qty: Some(qty) }
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids() -> Result<(), anyhow::Error> {
        let (svc, tmp) = file_service().await?;
        let a = svc.create(fields("n", "d", 5.0)).await?;
        let b = svc.create(fields("n", "d", 5.0)).await?;
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.fields, fields("n", "d", 5.0));

        assert_eq!(svc.get_one(&a.id).await?, Some(a));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn unknown_id_is_absent_not_error() -> Result<(), anyhow::Error> {
        let (svc, tmp) = file_service().await?;
        let ghost = Uuid::new_v4().to_string();
        assert_eq!(svc.get_one(&ghost).await?, None);
        assert_eq!(svc.update(&ghost, fields("x", "y", 1.0)).await?, None);
        assert_eq!(svc.delete(&ghost).await?, None);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_whole_document() -> Result<(), anyhow::Error> {
        let (svc, tmp) = file_service().await?;
        let created = svc.create(fields("n", "d", 5.0)).await?;

        let replacement = ItemFields { name: Some("renamed".into()), desc: None, qty: Some(-2.0) };
        let updated = svc.update(&created.id, replacement.clone()).await?.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.fields, replacement);

        let fetched = svc.get_one(&created.id).await?.unwrap();
        assert_eq!(fetched.fields, replacement);
        assert_eq!(fetched.fields.desc, None);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_twice_is_harmless() -> Result<(), anyhow::Error> {
        let (svc, tmp) = file_service().await?;
        let created = svc.create(fields("n", "d", 5.0)).await?;

        assert_eq!(svc.delete(&created.id).await?, Some(created.clone()));
        assert_eq!(svc.get_one(&created.id).await?, None);
        assert_eq!(svc.delete(&created.id).await?, None);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn get_all_contains_every_created_item() -> Result<(), anyhow::Error> {
        let (svc, tmp) = file_service().await?;
        assert!(svc.get_all().await?.is_empty());

        let mut ids = HashSet::new();
        for i in 0..5 {
            ids.insert(svc.create(fields(&format!("item {i}"), "", i as f64)).await?.id);
        }
        let listed: HashSet<String> = svc.get_all().await?.into_iter().map(|i| i.id).collect();
        assert!(ids.is_subset(&listed));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn malformed_id_propagates() -> Result<(), anyhow::Error> {
        let (svc, tmp) = file_service().await?;
        assert!(matches!(svc.get_one("not-an-id").await, Err(ServiceError::InvalidId(_))));
        assert!(matches!(svc.update("not-an-id", ItemFields::default()).await, Err(ServiceError::InvalidId(_))));
        assert!(matches!(svc.delete("not-an-id").await, Err(ServiceError::InvalidId(_))));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
