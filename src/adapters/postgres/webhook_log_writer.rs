//! PostgreSQL implementation of WebhookLogWriter.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{WebhookLogEntry, WebhookLogWriter};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

/// Appends audit entries to the `webhook_logs` table.
pub struct PostgresWebhookLogWriter {
    pool: PgPool,
}

impl PostgresWebhookLogWriter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WebhookLogWriter for PostgresWebhookLogWriter {
    async fn append(&self, entry: WebhookLogEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO webhook_logs (payload, headers, path, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Json(&entry.payload))
        .bind(Json(&entry.headers))
        .bind(entry.path())
        .bind(entry.logged_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to write webhook log: {}", e),
            )
        })?;

        Ok(())
    }
}
