//! PostgreSQL-backed certificate record store.

use async_trait::async_trait;
use sqlx::PgPool;

use super::RecordStore;
use crate::error::AppError;
use crate::models::{Certificate, NewCertificate};

/// Record store over the `certificates` table.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Certificate>, AppError> {
        let row = sqlx::query_as::<_, Certificate>(
            "SELECT id, name, grade, created_at FROM certificates WHERE id = $1 LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn insert(&self, certificate: &NewCertificate) -> Result<bool, AppError> {
        // Concurrent first issuances race here; the primary key decides the winner.
        let result = sqlx::query(
            r#"
            INSERT INTO certificates (id, name, grade, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&certificate.id)
        .bind(&certificate.name)
        .bind(&certificate.grade)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
