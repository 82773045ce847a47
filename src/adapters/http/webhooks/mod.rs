//! HTTP adapter for webhook endpoints.
//!
//! Exposes sale ingestion via REST API:
//! - `POST /api/webhooks/lojou` - Ingest a Lojou sale event
//! - `GET /api/webhooks/lojou/diagnostic` - Reachability check
//! - `GET /health` - Liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{DiagnosticResponse, HealthResponse, WebhookResponse};
pub use handlers::{IngestApiError, WebhookAppState};
pub use routes::{webhook_router, webhook_routes};
