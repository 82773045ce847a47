//! In-memory sale repository.
//!
//! Enforces `external_id` uniqueness under a single write lock, so
//! concurrent inserts race exactly like they do against the unique index.
//! Latency and outages can be injected for timeout and failure tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, ExternalId, SaleId};
use crate::domain::sales::Sale;
use crate::ports::{InsertResult, SaleRepository};

/// In-memory implementation of `SaleRepository`.
#[derive(Default)]
pub struct InMemorySaleRepository {
    sales: RwLock<Vec<Sale>>,
    latency: Option<Duration>,
    blind_lookups: bool,
    unavailable: AtomicBool,
}

impl InMemorySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given sales already stored.
    pub fn with_sales(sales: Vec<Sale>) -> Self {
        Self {
            sales: RwLock::new(sales),
            ..Self::default()
        }
    }

    /// Delays every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes `find_by_external_id` always miss, as if every lookup raced a
    /// concurrent insert. Only the insert-time check remains.
    pub fn with_blind_lookups(mut self) -> Self {
        self.blind_lookups = true;
        self
    }

    /// Makes every subsequent call fail with a database error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    // === Test Helpers ===

    /// Returns all stored sales.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn sales(&self) -> Vec<Sale> {
        self.sales
            .read()
            .expect("InMemorySaleRepository: lock poisoned")
            .clone()
    }

    /// Returns the number of stored sales.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn count(&self) -> usize {
        self.sales
            .read()
            .expect("InMemorySaleRepository: lock poisoned")
            .len()
    }

    async fn enter(&self) -> Result<(), DomainError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::database("sale store unavailable"));
        }
        Ok(())
    }
}

fn poisoned() -> DomainError {
    DomainError::new(ErrorCode::InternalError, "sale store lock poisoned")
}

#[async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<Sale>, DomainError> {
        self.enter().await?;
        if self.blind_lookups {
            return Ok(None);
        }
        let sales = self.sales.read().map_err(|_| poisoned())?;
        Ok(sales
            .iter()
            .find(|s| s.external_id.as_ref() == Some(external_id))
            .cloned())
    }

    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, DomainError> {
        self.enter().await?;
        let sales = self.sales.read().map_err(|_| poisoned())?;
        Ok(sales.iter().find(|s| &s.id == id).cloned())
    }

    async fn insert(&self, sale: &Sale) -> Result<InsertResult, DomainError> {
        self.enter().await?;
        let mut sales = self.sales.write().map_err(|_| poisoned())?;

        if let Some(external_id) = &sale.external_id {
            if sales
                .iter()
                .any(|s| s.external_id.as_ref() == Some(external_id))
            {
                return Ok(InsertResult::AlreadyExists);
            }
        }

        sales.push(sale.clone());
        Ok(InsertResult::Inserted)
    }
}
