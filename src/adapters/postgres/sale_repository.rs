//! PostgreSQL implementation of SaleRepository.
//!
//! Duplicate protection relies on the partial unique index
//! `sales_external_id_key`; the insert uses `ON CONFLICT DO NOTHING` and
//! reads the affected row count.

use crate::domain::foundation::{DomainError, ErrorCode, ExternalId, SaleId, Timestamp, UserId};
use crate::domain::sales::{Sale, SaleOrigin};
use crate::ports::{InsertResult, SaleRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the SaleRepository port.
pub struct PostgresSaleRepository {
    pool: PgPool,
}

impl PostgresSaleRepository {
    /// Creates a new PostgresSaleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a sale.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: Uuid,
    amount: Decimal,
    origin: String,
    description: String,
    sale_date: DateTime<Utc>,
    external_id: Option<String>,
    user_id: Uuid,
}

impl TryFrom<SaleRow> for Sale {
    type Error = DomainError;

    fn try_from(row: SaleRow) -> Result<Self, Self::Error> {
        let external_id = row
            .external_id
            .map(ExternalId::new)
            .transpose()
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid external_id: {}", e))
            })?;

        Ok(Sale {
            id: SaleId::from_uuid(row.id),
            amount: row.amount,
            origin: SaleOrigin::parse(&row.origin),
            description: row.description,
            sale_date: Timestamp::from_datetime(row.sale_date),
            external_id,
            user_id: UserId::from_uuid(row.user_id),
        })
    }
}

fn parse_user_id_as_uuid(user_id: &UserId) -> Result<Uuid, DomainError> {
    Uuid::parse_str(user_id.as_str()).map_err(|e| {
        DomainError::new(
            ErrorCode::ValidationFailed,
            format!("User ID must be a valid UUID: {}", e),
        )
    })
}

const SELECT_SALE: &str = r#"
    SELECT id, amount, origin, description, sale_date, external_id, user_id
    FROM sales
"#;

#[async_trait]
impl SaleRepository for PostgresSaleRepository {
    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<Sale>, DomainError> {
        let row: Option<SaleRow> =
            sqlx::query_as(&format!("{} WHERE external_id = $1", SELECT_SALE))
                .bind(external_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(ErrorCode::DatabaseError, format!("Failed to find sale: {}", e))
                })?;

        row.map(Sale::try_from).transpose()
    }

    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, DomainError> {
        let row: Option<SaleRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_SALE))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to find sale: {}", e))
            })?;

        row.map(Sale::try_from).transpose()
    }

    async fn insert(&self, sale: &Sale) -> Result<InsertResult, DomainError> {
        let user_uuid = parse_user_id_as_uuid(&sale.user_id)?;

        let result = sqlx::query(
            r#"
            INSERT INTO sales (id, amount, origin, description, sale_date, external_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (external_id) WHERE external_id IS NOT NULL DO NOTHING
            "#,
        )
        .bind(sale.id.as_uuid())
        .bind(sale.amount)
        .bind(sale.origin.as_str())
        .bind(&sale.description)
        .bind(sale.sale_date.as_datetime())
        .bind(sale.external_id.as_ref().map(ExternalId::as_str))
        .bind(user_uuid)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to insert sale: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Ok(InsertResult::AlreadyExists);
        }

        Ok(InsertResult::Inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(external_id: Option<&str>, origin: &str) -> SaleRow {
        SaleRow {
            id: Uuid::new_v4(),
            amount: Decimal::new(-25000, 2),
            origin: origin.to_string(),
            description: "Reversão: Venda Lojou: Curso X (a@b.com)".to_string(),
            sale_date: Utc::now(),
            external_id: external_id.map(str::to_string),
            user_id: Uuid::parse_str("a424fb0a-95a8-4c17-9d22-f40f23c2dee4").unwrap(),
        }
    }

    #[test]
    fn row_converts_to_sale() {
        let sale = Sale::try_from(row(Some("ORD-1"), "Lojou")).unwrap();
        assert_eq!(sale.origin, SaleOrigin::Lojou);
        assert_eq!(sale.external_id, Some(ExternalId::new("ORD-1").unwrap()));
        assert_eq!(sale.user_id.as_str(), "a424fb0a-95a8-4c17-9d22-f40f23c2dee4");
    }

    #[test]
    fn reversal_origin_round_trips_from_database_tag() {
        let sale = Sale::try_from(row(None, "Reversão")).unwrap();
        assert!(sale.is_reversal());
        assert!(sale.external_id.is_none());
    }

    #[test]
    fn empty_external_id_in_database_is_rejected() {
        let err = Sale::try_from(row(Some(""), "Lojou")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn parse_user_id_rejects_invalid_uuid() {
        let user_id = UserId::new("not-a-uuid").unwrap();
        assert!(parse_user_id_as_uuid(&user_id).is_err());
    }
}
