//! HTTP adapter for the `send-notification` edge function.
//!
//! The function stores the notification for the in-app bell and fans it out
//! as Web Push to the user's subscriptions. It is called with the service
//! key as a bearer token.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::ports::{Notification, NotificationDispatcher, NotificationError};

/// Edge function connection settings.
#[derive(Clone)]
pub struct EdgeFunctionConfig {
    /// Full URL of the function.
    pub function_url: String,
    pub service_key: SecretString,
    pub timeout: Duration,
}

impl EdgeFunctionConfig {
    pub fn new(function_url: impl Into<String>, service_key: SecretString) -> Self {
        Self {
            function_url: function_url.into(),
            service_key,
            timeout: Duration::from_millis(5000),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for EdgeFunctionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeFunctionConfig")
            .field("function_url", &self.function_url)
            .field("service_key", &"[redacted]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Sends notifications through the edge function.
pub struct EdgeFunctionNotificationDispatcher {
    config: EdgeFunctionConfig,
    http_client: reqwest::Client,
}

impl EdgeFunctionNotificationDispatcher {
    /// Creates a dispatcher with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::Transport` if the client cannot be built.
    pub fn new(config: EdgeFunctionConfig) -> Result<Self, NotificationError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotificationError::Transport(e.to_string()))?;
        Ok(Self::with_client(config, http_client))
    }

    /// Creates a dispatcher sharing an existing client.
    pub fn with_client(config: EdgeFunctionConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl NotificationDispatcher for EdgeFunctionNotificationDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<(), NotificationError> {
        let response = self
            .http_client
            .post(&self.config.function_url)
            .bearer_auth(self.config.service_key.expose_secret())
            .timeout(self.config.timeout)
            .json(notification)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotificationError::Timeout(self.config.timeout.as_millis() as u64)
                } else {
                    NotificationError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(user_id = %notification.user_id, "Notification dispatched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured {
        requests: Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>,
    }

    async fn capture(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> StatusCode {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        captured.requests.lock().unwrap().push((auth, body));
        StatusCode::OK
    }

    async fn reject() -> (StatusCode, &'static str) {
        (StatusCode::SERVICE_UNAVAILABLE, "push down")
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/functions/v1/send-notification", addr)
    }

    fn notification() -> Notification {
        Notification {
            user_id: UserId::new("a424fb0a-95a8-4c17-9d22-f40f23c2dee4").unwrap(),
            title: "💰 Venda Registrada!".to_string(),
            body: "Valor: 250 MZN - Curso X".to_string(),
            url: "/vendas".to_string(),
        }
    }

    fn dispatcher(url: String) -> EdgeFunctionNotificationDispatcher {
        let config = EdgeFunctionConfig::new(url, SecretString::new("service-key".to_string()))
            .with_timeout(Duration::from_secs(2));
        EdgeFunctionNotificationDispatcher::new(config).unwrap()
    }

    #[tokio::test]
    async fn dispatch_posts_json_with_bearer_token() {
        let captured = Captured::default();
        let router = Router::new()
            .route("/functions/v1/send-notification", post(capture))
            .with_state(captured.clone());
        let url = serve(router).await;

        dispatcher(url).dispatch(&notification()).await.unwrap();

        let requests = captured.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (auth, body) = &requests[0];
        assert_eq!(auth.as_deref(), Some("Bearer service-key"));
        assert_eq!(body["userId"], "a424fb0a-95a8-4c17-9d22-f40f23c2dee4");
        assert_eq!(body["title"], "💰 Venda Registrada!");
        assert_eq!(body["url"], "/vendas");
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let router = Router::new().route("/functions/v1/send-notification", post(reject));
        let url = serve(router).await;

        let err = dispatcher(url).dispatch(&notification()).await.unwrap_err();

        match err {
            NotificationError::Rejected { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "push down");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn debug_output_hides_service_key() {
        let config = EdgeFunctionConfig::new(
            "https://example.supabase.co/functions/v1/send-notification",
            SecretString::new("service-key".to_string()),
        );
        assert!(!format!("{:?}", config).contains("service-key"));
    }
}
