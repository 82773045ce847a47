//! Notification configuration (send-notification edge function)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Notification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Full URL of the `send-notification` function
    pub function_url: String,

    /// Service key sent as bearer token
    pub service_key: SecretString,

    /// Per-notification timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Send notifications at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl NotificationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate notification configuration
    ///
    /// Nothing but the timeout is checked when notifications are disabled.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.timeout_ms == 0 || self.timeout_ms > 30_000 {
            return Err(ValidationError::InvalidNotificationTimeout);
        }
        if !self.enabled {
            return Ok(());
        }

        if self.function_url.is_empty() {
            return Err(ValidationError::MissingRequired("NOTIFICATION__FUNCTION_URL"));
        }
        if self.service_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("NOTIFICATION__SERVICE_KEY"));
        }

        let is_https = self.function_url.starts_with("https://");
        if !is_https && !self.function_url.starts_with("http://") {
            return Err(ValidationError::InvalidNotificationUrl);
        }
        if *environment == Environment::Production && !is_https {
            return Err(ValidationError::NotificationUrlMustBeHttps);
        }
        Ok(())
    }
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_enabled() -> bool {
    true
}
