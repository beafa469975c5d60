#![cfg(test)]
use migration::MigratorTrait;
use models::db::{connect_with_config, DATABASE_URL};
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Postgres connection for tests, or `None` when the run has no database.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let cfg = configs::DatabaseConfig {
        url: DATABASE_URL.clone(),
        max_connections: 20,
        min_connections: 1,
        acquire_timeout_secs: 10,
        ..Default::default()
    };

    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Fresh connection for the current test's runtime
    let db = connect_with_config(&cfg).await?;
    Ok(Some(db))
}
