//! Dispatcher used when notifications are switched off.

use async_trait::async_trait;

use crate::ports::{Notification, NotificationDispatcher, NotificationError};

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotificationDispatcher;

#[async_trait]
impl NotificationDispatcher for DisabledNotificationDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<(), NotificationError> {
        tracing::debug!(
            user_id = %notification.user_id,
            "Notifications disabled, dropping notification"
        );
        Ok(())
    }
}
