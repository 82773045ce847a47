//! Recording notification dispatcher.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use crate::ports::{Notification, NotificationDispatcher, NotificationError};

/// Records dispatched notifications instead of sending them.
///
/// A notification is recorded even when the dispatcher is set to fail, so
/// tests can tell "attempted" from "never attempted".
#[derive(Default)]
pub struct RecordingNotificationDispatcher {
    sent: RwLock<Vec<Notification>>,
    latency: Option<Duration>,
    failing: AtomicBool,
}

impl RecordingNotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every dispatch by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes every subsequent dispatch fail after recording it.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    // === Test Helpers ===

    /// Returns all attempted notifications.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .read()
            .expect("RecordingNotificationDispatcher: lock poisoned")
            .clone()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingNotificationDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.sent
            .write()
            .map_err(|_| NotificationError::Transport("recorder lock poisoned".to_string()))?
            .push(notification.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::Rejected {
                status: 503,
                body: "push service unavailable".to_string(),
            });
        }
        Ok(())
    }
}
