//! Sale entity.
//!
//! A Sale is written once and never updated. Corrections are recorded as a
//! reversal: a new Sale carrying the negated amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, ExternalId, SaleId, Timestamp, UserId};

use super::SaleOrigin;

/// A recorded sale.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `external_id`, when present, is unique across all sales
/// - `user_id` is always set
/// - negative `amount` only appears on reversals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier for this sale.
    pub id: SaleId,

    /// Signed amount in the account currency (MZN).
    pub amount: Decimal,

    /// Source tag.
    pub origin: SaleOrigin,

    /// Human-readable description.
    pub description: String,

    /// When the sale was recorded (processing time, not the platform's).
    pub sale_date: Timestamp,

    /// Platform identifier used for deduplication.
    pub external_id: Option<ExternalId>,

    /// Account that owns this sale.
    pub user_id: UserId,
}

impl Sale {
    /// Create a sale received from the Lojou platform.
    pub fn from_lojou(
        amount: Decimal,
        description: impl Into<String>,
        external_id: Option<ExternalId>,
        user_id: UserId,
    ) -> Self {
        Self {
            id: SaleId::new(),
            amount,
            origin: SaleOrigin::Lojou,
            description: description.into(),
            sale_date: Timestamp::now(),
            external_id,
            user_id,
        }
    }

    /// Whether this sale is itself a reversal.
    pub fn is_reversal(&self) -> bool {
        self.origin == SaleOrigin::Reversal
    }

    /// Build the reversal of this sale.
    ///
    /// The reversal's external id is derived from this sale's id, so the
    /// store's uniqueness constraint allows at most one reversal per sale.
    ///
    /// # Errors
    ///
    /// - `InvalidReversal` if this sale is a reversal or its amount is not positive
    pub fn reversal(&self) -> Result<Sale, DomainError> {
        if self.is_reversal() {
            return Err(DomainError::new(
                ErrorCode::InvalidReversal,
                "A reversal cannot be reversed",
            )
            .with_detail("sale_id", self.id.to_string()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(DomainError::new(
                ErrorCode::InvalidReversal,
                "Only sales with a positive amount can be reversed",
            )
            .with_detail("sale_id", self.id.to_string()));
        }

        Ok(Sale {
            id: SaleId::new(),
            amount: -self.amount,
            origin: SaleOrigin::Reversal,
            description: format!("Reversão: {}", self.description),
            sale_date: Timestamp::now(),
            external_id: Some(ExternalId::reversal_of(&self.id)),
            user_id: self.user_id.clone(),
        })
    }
}
