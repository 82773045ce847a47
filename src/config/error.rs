//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host or port")]
    InvalidBindAddress,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Invalid notification function URL format")]
    InvalidNotificationUrl,

    #[error("Notification function URL must use HTTPS in production")]
    NotificationUrlMustBeHttps,

    #[error("Invalid notification timeout")]
    InvalidNotificationTimeout,

    #[error("Default owner id must be a UUID")]
    InvalidDefaultOwner,

    #[error("Invalid shared secret header name")]
    InvalidSecretHeader,

    #[error("Invalid store timeout")]
    InvalidStoreTimeout,
}
