//! RecordSaleReversalHandler - Command handler for reversing a recorded sale.
//!
//! Sales are never edited. A correction is a second sale with the negated
//! amount, so the ledger always sums to the true revenue.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, SaleId};
use crate::domain::sales::Sale;
use crate::ports::{InsertResult, SaleRepository};

/// Command to reverse a sale.
#[derive(Debug, Clone)]
pub struct RecordSaleReversalCommand {
    pub sale_id: SaleId,
}

/// Result of a successful reversal.
#[derive(Debug, Clone)]
pub struct RecordSaleReversalResult {
    pub reversal: Sale,
}

/// Handler for recording sale reversals.
pub struct RecordSaleReversalHandler {
    sales: Arc<dyn SaleRepository>,
    store_timeout: Duration,
}

impl RecordSaleReversalHandler {
    pub fn new(sales: Arc<dyn SaleRepository>) -> Self {
        Self {
            sales,
            store_timeout: Duration::from_millis(5000),
        }
    }

    /// Bound each store call; elapsed calls fail with `ErrorCode::Timeout`.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// # Errors
    ///
    /// - `SaleNotFound` if the sale does not exist
    /// - `InvalidReversal` if the sale is a reversal or not positive
    /// - `SaleAlreadyReversed` if a reversal was already recorded
    /// - `Timeout` if a store call exceeds the store timeout
    pub async fn handle(
        &self,
        cmd: RecordSaleReversalCommand,
    ) -> Result<RecordSaleReversalResult, DomainError> {
        let sale = self
            .bounded("find_sale_by_id", self.sales.find_by_id(&cmd.sale_id))
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::SaleNotFound, "Sale not found")
                    .with_detail("sale_id", cmd.sale_id.to_string())
            })?;

        let reversal = sale.reversal()?;

        match self.bounded("insert_sale", self.sales.insert(&reversal)).await? {
            InsertResult::Inserted => {
                tracing::info!(
                    sale_id = %sale.id,
                    reversal_id = %reversal.id,
                    user_id = %reversal.user_id,
                    "Recorded sale reversal"
                );
                Ok(RecordSaleReversalResult { reversal })
            }
            InsertResult::AlreadyExists => Err(DomainError::new(
                ErrorCode::SaleAlreadyReversed,
                "Sale has already been reversed",
            )
            .with_detail("sale_id", sale.id.to_string())),
        }
    }

    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        tokio::time::timeout(self.store_timeout, call)
            .await
            .map_err(|_| DomainError::timeout(operation))?
    }
}
