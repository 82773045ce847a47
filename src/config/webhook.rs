//! Webhook ingestion configuration

use axum::http::HeaderName;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use crate::application::IngestionPolicy;
use crate::domain::foundation::UserId;
use crate::domain::ingestion::SharedSecretVerifier;

use super::error::ValidationError;

/// Webhook ingestion configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Account credited when no annual goal is active
    pub default_owner_id: String,

    /// Shared secret the platform must send; endpoint is open when unset
    #[serde(default)]
    pub shared_secret: Option<SecretString>,

    /// Header carrying the shared secret
    #[serde(default = "default_secret_header")]
    pub secret_header: String,

    /// Per-call store timeout in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
}

impl WebhookConfig {
    /// Get store timeout as Duration
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Parse the default owner
    pub fn default_owner(&self) -> Result<UserId, ValidationError> {
        Uuid::parse_str(&self.default_owner_id)
            .map(UserId::from_uuid)
            .map_err(|_| ValidationError::InvalidDefaultOwner)
    }

    /// Whether callers must present a shared secret
    pub fn is_secured(&self) -> bool {
        self.shared_secret.is_some()
    }

    /// Build the ingestion policy
    pub fn ingestion_policy(&self, notify_timeout: Duration) -> Result<IngestionPolicy, ValidationError> {
        let mut policy = IngestionPolicy::new(self.default_owner()?)
            .with_store_timeout(self.store_timeout())
            .with_notify_timeout(notify_timeout);

        if let Some(secret) = &self.shared_secret {
            policy = policy.with_secret(SharedSecretVerifier::new(secret.clone()), &self.secret_header);
        }
        Ok(policy)
    }

    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_owner_id.is_empty() {
            return Err(ValidationError::MissingRequired("WEBHOOK__DEFAULT_OWNER_ID"));
        }
        self.default_owner()?;

        if HeaderName::from_bytes(self.secret_header.as_bytes()).is_err() {
            return Err(ValidationError::InvalidSecretHeader);
        }
        if let Some(secret) = &self.shared_secret {
            if secret.expose_secret().is_empty() {
                return Err(ValidationError::MissingRequired("WEBHOOK__SHARED_SECRET"));
            }
        }
        if self.store_timeout_ms == 0 || self.store_timeout_ms > 60_000 {
            return Err(ValidationError::InvalidStoreTimeout);
        }
        Ok(())
    }
}

fn default_secret_header() -> String {
    crate::application::handlers::ingestion::DEFAULT_SECRET_HEADER.to_string()
}

fn default_store_timeout_ms() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "a424fb0a-95a8-4c17-9d22-f40f23c2dee4";

    fn config() -> WebhookConfig {
        WebhookConfig {
            default_owner_id: OWNER.to_string(),
            shared_secret: None,
            secret_header: default_secret_header(),
            store_timeout_ms: default_store_timeout_ms(),
        }
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.secret_header, "x-webhook-secret");
        assert_eq!(config.store_timeout(), Duration::from_millis(5000));
        assert!(!config.is_secured());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_owner() {
        let mut config = config();
        config.default_owner_id = String::new();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validation_owner_not_uuid() {
        let mut config = config();
        config.default_owner_id = "kaito".to_string();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidDefaultOwner)
        ));
    }

    #[test]
    fn test_validation_bad_header_name() {
        let mut config = config();
        config.secret_header = "x webhook secret".to_string();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSecretHeader)
        ));
    }

    #[test]
    fn test_validation_empty_secret() {
        let mut config = config();
        config.shared_secret = Some(SecretString::new(String::new()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_store_timeout() {
        let mut config = config();
        config.store_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_uses_owner_and_timeouts() {
        let policy = config().ingestion_policy(Duration::from_millis(750)).unwrap();
        assert_eq!(policy.default_owner.as_str(), OWNER);
        assert_eq!(policy.store_timeout, Duration::from_millis(5000));
        assert_eq!(policy.notify_timeout, Duration::from_millis(750));
        assert!(policy.secret.is_none());
    }

    #[test]
    fn test_policy_carries_secret() {
        let mut config = config();
        config.shared_secret = Some(SecretString::new("s3cret".to_string()));
        config.secret_header = "X-Lojou-Token".to_string();

        let policy = config.ingestion_policy(Duration::from_secs(5)).unwrap();

        assert!(policy.secret.is_some());
        assert_eq!(policy.secret_header, "x-lojou-token");
    }
}
