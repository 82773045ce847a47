//! HTTP adapters - REST API implementations.

pub mod webhooks;

// Re-export key types for convenience
pub use webhooks::webhook_router;
pub use webhooks::WebhookAppState;
