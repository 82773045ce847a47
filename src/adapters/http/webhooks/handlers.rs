//! HTTP handlers for webhook endpoints.
//!
//! These handlers connect Axum routes to the ingestion command handler.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use crate::application::{IngestSaleEventCommand, IngestSaleEventHandler, IngestionPolicy};
use crate::domain::ingestion::IngestError;
use crate::ports::{GoalReader, NotificationDispatcher, SaleRepository, WebhookLogWriter};

use super::dto::{DiagnosticResponse, HealthResponse, WebhookResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for webhook endpoints.
///
/// Cloned for each request; dependencies are Arc-wrapped.
#[derive(Clone)]
pub struct WebhookAppState {
    pub sale_repository: Arc<dyn SaleRepository>,
    pub goal_reader: Arc<dyn GoalReader>,
    pub webhook_log: Arc<dyn WebhookLogWriter>,
    pub notifier: Arc<dyn NotificationDispatcher>,
    pub policy: IngestionPolicy,
}

impl WebhookAppState {
    /// Create the ingestion handler from the shared state.
    pub fn ingest_handler(&self) -> IngestSaleEventHandler {
        IngestSaleEventHandler::new(
            self.sale_repository.clone(),
            self.goal_reader.clone(),
            self.webhook_log.clone(),
            self.notifier.clone(),
            self.policy.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/webhooks/lojou - Ingest a Lojou sale event
pub async fn handle_lojou_webhook(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, IngestApiError> {
    let cmd = IngestSaleEventCommand {
        body: body.to_vec(),
        headers: header_map(&headers),
    };

    let result = state.ingest_handler().handle(cmd).await?;

    Ok(Json(WebhookResponse::from(&result)))
}

/// GET /api/webhooks/lojou/diagnostic - Reachability check for platform setup
pub async fn lojou_diagnostic() -> impl IntoResponse {
    Json(DiagnosticResponse::now())
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Flattens request headers. Values that are not visible ASCII are dropped.
fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts ingestion errors to HTTP responses.
pub struct IngestApiError(IngestError);

impl From<IngestError> for IngestApiError {
    fn from(err: IngestError) -> Self {
        Self(err)
    }
}

impl IntoResponse for IngestApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();
        // Store errors are logged by the handler; the caller only learns to retry.
        let message = match &self.0 {
            IngestError::Persistence(_) => "Falha ao registrar venda".to_string(),
            other => other.to_string(),
        };
        (status, Json(WebhookResponse::failed(message))).into_response()
    }
}
