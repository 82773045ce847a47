//! Axum router configuration for webhook endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{handle_lojou_webhook, health, lojou_diagnostic, WebhookAppState};

/// Create the Lojou webhook routes.
///
/// # Routes
/// - `POST /lojou` - Ingest a sale event (shared secret verified when configured)
/// - `GET /lojou/diagnostic` - Reachability check
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new()
        .route("/lojou", post(handle_lojou_webhook))
        .route("/lojou/diagnostic", get(lojou_diagnostic))
}

/// Create the complete service router.
///
/// Mounts the webhook routes under `/api/webhooks` and the liveness probe at
/// `/health`.
///
/// # Example
///
/// ```ignore
/// let app = webhook_router().with_state(state);
/// axum::serve(listener, app).await?;
/// ```
pub fn webhook_router() -> Router<WebhookAppState> {
    Router::new()
        .nest("/api/webhooks", webhook_routes())
        .route("/health", get(health))
}
