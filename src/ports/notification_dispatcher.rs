//! NotificationDispatcher port - Push notifications to the account owner.
//!
//! Notifications are a side effect of recording a sale. A failure here is
//! reported to the caller, which logs it; it never undoes the sale.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::UserId;

/// A notification addressed to one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub user_id: UserId,
    pub title: String,
    pub body: String,
    /// In-app route opened when the notification is tapped.
    pub url: String,
}

/// Errors from the notification transport.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Notification transport error: {0}")]
    Transport(String),

    #[error("Notification timed out after {0}ms")]
    Timeout(u64),
}

/// Port for delivering notifications.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, notification: &Notification) -> Result<(), NotificationError>;
}
