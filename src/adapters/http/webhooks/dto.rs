//! Data Transfer Objects for webhook endpoints.
//!
//! These types define the HTTP API contract seen by the Lojou platform.

use serde::{Deserialize, Serialize};

use crate::application::IngestSaleEventResult;
use crate::domain::ingestion::ACCEPTED_STATUSES;

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response to a webhook delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

impl From<&IngestSaleEventResult> for WebhookResponse {
    fn from(result: &IngestSaleEventResult) -> Self {
        Self::ok(result.message())
    }
}

/// Shape of the payload the endpoint understands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedPayload {
    pub status: String,
    pub amount: String,
    pub product: ExpectedField,
    pub customer: ExpectedField,
    pub order_number: String,
    pub transaction_id: String,
}

/// Nested field description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Response of the diagnostic endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticResponse {
    pub status: String,
    pub message: String,
    /// RFC 3339 server time.
    pub timestamp: String,
    pub accepted_statuses: Vec<String>,
    pub expected_payload: ExpectedPayload,
}

impl DiagnosticResponse {
    pub fn now() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Webhook Lojou está acessível".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            accepted_statuses: ACCEPTED_STATUSES.iter().map(|s| s.to_string()).collect(),
            expected_payload: ExpectedPayload {
                status: "approved".to_string(),
                amount: "number".to_string(),
                product: ExpectedField {
                    name: Some("string".to_string()),
                    email: None,
                },
                customer: ExpectedField {
                    name: None,
                    email: Some("string".to_string()),
                },
                order_number: "string (optional)".to_string(),
                transaction_id: "string (optional)".to_string(),
            },
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
