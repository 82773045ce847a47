//! PostgreSQL implementation of GoalReader.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::GoalReader;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Reads goal ownership from the `goals` table.
pub struct PostgresGoalReader {
    pool: PgPool,
}

impl PostgresGoalReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GoalReader for PostgresGoalReader {
    async fn active_annual_goal_owner(&self) -> Result<Option<UserId>, DomainError> {
        let owner: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT user_id
            FROM goals
            WHERE type = 'annual' AND is_active = true
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find annual goal: {}", e))
        })?;

        Ok(owner.map(UserId::from_uuid))
    }
}
