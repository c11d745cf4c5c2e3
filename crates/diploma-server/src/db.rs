//! PostgreSQL pool backing the certificate record store.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connections held by the pool. Each issuance or verification uses one
/// connection at a time, for at most two short statements.
const MAX_CONNECTIONS: u32 = 10;

/// Creates the pool handed to [`PgRecordStore`](crate::stores::PgRecordStore).
///
/// # Arguments
/// * `database_url` - PostgreSQL connection string (`DATABASE_URL`)
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Creates the `certificates` table if it does not exist yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
