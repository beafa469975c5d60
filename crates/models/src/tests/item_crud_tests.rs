use crate::db::connect;
use crate::item::{self, ItemFields};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

/// `None` when no Postgres is configured for this run.
async fn setup_test_db() -> Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}

#[tokio::test]
async fn test_item_crud() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()); };

    let created = item::create(&db, ItemFields { name: Some("n".into()), desc: Some("d".into()), qty: Some(5.0) }).await?;
    let found = item::find(&db, created.id).await?.expect("created row");
    assert_eq!(found, created);

    let replaced = item::replace(&db, created.id, ItemFields { name: Some("m".into()), desc: None, qty: None })
        .await?
        .expect("row still exists");
    assert_eq!(replaced.name.as_deref(), Some("m"));
    assert_eq!(replaced.desc, None);
    assert_eq!(replaced.qty, None);

    let all = item::find_all(&db).await?;
    assert!(all.iter().any(|m| m.id == created.id));

    let removed = item::remove(&db, created.id).await?.expect("removed row");
    assert_eq!(removed, replaced);
    assert!(item::find(&db, created.id).await?.is_none());
    assert!(item::remove(&db, created.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_item_missing_rows() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()); };

    let ghost = Uuid::new_v4();
    assert!(item::find(&db, ghost).await?.is_none());
    assert!(item::replace(&db, ghost, ItemFields::default()).await?.is_none());
    assert!(item::remove(&db, ghost).await?.is_none());
    Ok(())
}

#[test]
fn replace_race_with_delete_is_not_an_error() {
    let id = Uuid::new_v4();
    assert!(matches!(item::updated_or_gone(Err(DbErr::RecordNotUpdated)), Ok(None)));

    let row = item::Model { id, name: Some("n".into()), desc: None, qty: None };
    assert_eq!(item::updated_or_gone(Ok(row.clone())).unwrap(), Some(row));

    let err = item::updated_or_gone(Err(DbErr::Custom("boom".into()))).unwrap_err();
    assert!(err.to_string().contains("boom"));
}
