//! SaleRepository port - Interface for durable sale storage.
//!
//! Sales are append-only: there is no update or delete.
//!
//! ## Duplicate Protection
//!
//! The platform may deliver the same event more than once, and two
//! deliveries can race. Implementations must enforce uniqueness of
//! `external_id` (a unique index in PostgreSQL) and report a conflict as
//! `InsertResult::AlreadyExists` instead of an error. The read-side
//! `find_by_external_id` is only a fast path.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ExternalId, SaleId};
use crate::domain::sales::Sale;

/// Result of attempting to insert a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// Row was inserted.
    Inserted,
    /// A sale with the same external id already exists.
    AlreadyExists,
}

/// Port for storing and retrieving sales.
#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// Find a sale by its platform identifier.
    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<Sale>, DomainError>;

    /// Find a sale by id.
    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, DomainError>;

    /// Insert a new sale.
    ///
    /// Returns `InsertResult::AlreadyExists` when the external id is taken.
    async fn insert(&self, sale: &Sale) -> Result<InsertResult, DomainError>;
}
