use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::AppConfig;
use crate::seed;

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    // A transition is one read and one write; keep the pool modest.
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("server::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

/// Connect when the configuration needs a database, then prepare it.
pub async fn connect_if_needed(config: &AppConfig) -> anyhow::Result<Option<DatabaseConnection>> {
    if !config.needs_database() {
        return Ok(None);
    }

    let url = config
        .database
        .url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("database.url is required by this configuration"))?;

    let db = init_db(url).await?;
    seed::ensure_indexes(&db).await?;
    if !config.periods.list.is_empty() {
        seed::seed_periods(&db, &config.periods.list, config.periods.current.as_deref()).await?;
    }
    info!("Database ready");

    Ok(Some(db))
}
