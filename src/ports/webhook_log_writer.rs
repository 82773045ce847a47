//! WebhookLogWriter port - Append-only audit trail of inbound webhooks.
//!
//! Every delivery is logged before it is interpreted, so that payloads the
//! service fails to understand can be inspected later. Writes are
//! best-effort: callers log a failure and carry on.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::domain::foundation::DomainError;

/// The point in the ingestion flow at which an entry was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookLogStage {
    /// Body as received, before parsing.
    Raw,
    /// Body successfully parsed as JSON.
    Parsed,
    /// Ingestion failed.
    Error,
}

impl WebhookLogStage {
    /// Path tag stored with the entry.
    pub fn path(&self) -> &'static str {
        match self {
            WebhookLogStage::Raw => "/api/webhooks/lojou/raw",
            WebhookLogStage::Parsed => "/api/webhooks/lojou",
            WebhookLogStage::Error => "/api/webhooks/lojou/error",
        }
    }
}

/// A single audit entry.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookLogEntry {
    pub stage: WebhookLogStage,
    pub payload: Value,
    /// Request headers, already redacted.
    pub headers: BTreeMap<String, String>,
    pub logged_at: DateTime<Utc>,
}

impl WebhookLogEntry {
    /// Entry for the raw body.
    pub fn raw(raw_body: &str, headers: BTreeMap<String, String>) -> Self {
        Self::at(WebhookLogStage::Raw, json!({ "raw_body": raw_body }), headers)
    }

    /// Entry for the parsed payload.
    pub fn parsed(payload: Value, headers: BTreeMap<String, String>) -> Self {
        Self::at(WebhookLogStage::Parsed, payload, headers)
    }

    /// Entry for a failed ingestion.
    ///
    /// `body` is the parsed payload when parsing succeeded, otherwise the
    /// raw text.
    pub fn error(error: impl Into<String>, body: Value, headers: BTreeMap<String, String>) -> Self {
        Self::at(
            WebhookLogStage::Error,
            json!({ "error": error.into(), "rawBody": body }),
            headers,
        )
    }

    fn at(stage: WebhookLogStage, payload: Value, headers: BTreeMap<String, String>) -> Self {
        Self {
            stage,
            payload,
            headers,
            logged_at: Utc::now(),
        }
    }

    pub fn path(&self) -> &'static str {
        self.stage.path()
    }
}

/// Port for appending webhook audit entries.
#[async_trait]
pub trait WebhookLogWriter: Send + Sync {
    async fn append(&self, entry: WebhookLogEntry) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_map_to_distinct_paths() {
        assert_eq!(WebhookLogStage::Raw.path(), "/api/webhooks/lojou/raw");
        assert_eq!(WebhookLogStage::Parsed.path(), "/api/webhooks/lojou");
        assert_eq!(WebhookLogStage::Error.path(), "/api/webhooks/lojou/error");
    }

    #[test]
    fn raw_entry_wraps_body_text() {
        let entry = WebhookLogEntry::raw("not json", BTreeMap::new());
        assert_eq!(entry.payload, json!({ "raw_body": "not json" }));
        assert_eq!(entry.stage, WebhookLogStage::Raw);
    }

    #[test]
    fn error_entry_carries_message_and_body() {
        let entry = WebhookLogEntry::error(
            "Invalid amount: amount is missing",
            json!({ "status": "paid" }),
            BTreeMap::new(),
        );
        assert_eq!(entry.payload["error"], "Invalid amount: amount is missing");
        assert_eq!(entry.payload["rawBody"]["status"], "paid");
        assert_eq!(entry.path(), "/api/webhooks/lojou/error");
    }
}
