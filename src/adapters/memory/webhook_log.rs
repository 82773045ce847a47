//! In-memory webhook audit log.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{WebhookLogEntry, WebhookLogStage, WebhookLogWriter};

/// Captures audit entries for assertions.
#[derive(Default)]
pub struct InMemoryWebhookLog {
    entries: RwLock<Vec<WebhookLogEntry>>,
    failing: AtomicBool,
}

impl InMemoryWebhookLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent append fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    // === Test Helpers ===

    /// Returns all entries in append order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn entries(&self) -> Vec<WebhookLogEntry> {
        self.entries
            .read()
            .expect("InMemoryWebhookLog: lock poisoned")
            .clone()
    }

    /// Returns entries written at the given stage.
    pub fn entries_at(&self, stage: WebhookLogStage) -> Vec<WebhookLogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.stage == stage)
            .collect()
    }
}

#[async_trait]
impl WebhookLogWriter for InMemoryWebhookLog {
    async fn append(&self, entry: WebhookLogEntry) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::database("webhook log unavailable"));
        }
        self.entries
            .write()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "webhook log lock poisoned"))?
            .push(entry);
        Ok(())
    }
}
