//! SQLite pool and schema-on-startup for the entity tables.

use crate::error::AppError;
use crate::model::EntityRegistry;
use crate::sql::{count_rows, create_table};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// How long a writer waits for the database lock before reporting a store failure.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (creating if missing) the SQLite file at `path`.
pub async fn connect(path: &Path) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// CREATE TABLE IF NOT EXISTS for every registered entity. Safe on every startup; never drops data.
pub async fn ensure_schema(pool: &SqlitePool, registry: &EntityRegistry) -> Result<(), AppError> {
    for entity in &registry.entities {
        let ddl = create_table(entity);
        tracing::debug!(table = entity.table_name, sql = %ddl, "ensure table");
        sqlx::query(&ddl).execute(pool).await?;
    }
    Ok(())
}

/// Row count per entity table, keyed by table name. Fails if any table is missing.
pub async fn table_counts(
    pool: &SqlitePool,
    registry: &EntityRegistry,
) -> Result<BTreeMap<&'static str, i64>, AppError> {
    let mut counts = BTreeMap::new();
    for entity in &registry.entities {
        let q = count_rows(entity);
        let (n,): (i64,) = sqlx::query_as(&q.sql).fetch_one(pool).await?;
        counts.insert(entity.table_name, n);
    }
    Ok(counts)
}
