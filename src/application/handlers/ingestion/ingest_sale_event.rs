//! IngestSaleEventHandler - Command handler for Lojou sale webhooks.
//!
//! Turns one inbound delivery into at most one recorded Sale:
//!
//! 1. Audit the raw body
//! 2. Check the shared secret, when configured
//! 3. Parse and audit the payload
//! 4. Gate on the reported status
//! 5. Deduplicate on the platform identifier
//! 6. Attribute to the annual goal owner and insert
//! 7. Notify the owner (best-effort)
//!
//! Audit writes and the notification never change the outcome. Every store
//! call is bounded by the policy's store timeout.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::domain::foundation::{DomainError, ExternalId, UserId};
use crate::domain::ingestion::{IngestError, SaleEvent, SharedSecretVerifier, StatusClass};
use crate::domain::sales::Sale;
use crate::ports::{
    GoalReader, InsertResult, Notification, NotificationDispatcher, NotificationError,
    SaleRepository, WebhookLogEntry, WebhookLogWriter,
};

/// Header used for the shared secret unless configured otherwise.
pub const DEFAULT_SECRET_HEADER: &str = "x-webhook-secret";

/// Headers that are never written to the audit log in clear.
const CREDENTIAL_HEADERS: [&str; 2] = ["authorization", "cookie"];

const REDACTED: &str = "[redacted]";

/// Command to ingest one webhook delivery.
#[derive(Debug, Clone)]
pub struct IngestSaleEventCommand {
    /// Request body as received.
    pub body: Vec<u8>,
    /// Request headers with lower-case names.
    pub headers: BTreeMap<String, String>,
}

/// Successful outcome of an ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestSaleEventResult {
    /// A new sale was stored.
    Recorded { sale: Sale },
    /// A sale with this platform identifier already exists.
    Duplicate { external_id: ExternalId },
    /// The reported status does not mean a settled payment.
    Ignored { status: Option<String> },
}

impl IngestSaleEventResult {
    /// Message returned to the platform.
    pub fn message(&self) -> String {
        match self {
            IngestSaleEventResult::Recorded { .. } => "Venda registrada com sucesso".to_string(),
            IngestSaleEventResult::Duplicate { .. } => {
                "Venda já registrada (duplicada)".to_string()
            }
            IngestSaleEventResult::Ignored { status } => format!(
                "Status ignorado: {}",
                status.as_deref().unwrap_or("sem status")
            ),
        }
    }
}

/// Tunables for ingestion.
#[derive(Debug, Clone)]
pub struct IngestionPolicy {
    /// Owner of sales when no annual goal is active.
    pub default_owner: UserId,
    pub store_timeout: Duration,
    pub notify_timeout: Duration,
    pub secret: Option<SharedSecretVerifier>,
    /// Lower-case header name carrying the shared secret.
    pub secret_header: String,
}

impl IngestionPolicy {
    /// Open endpoint with default timeouts.
    pub fn new(default_owner: UserId) -> Self {
        Self {
            default_owner,
            store_timeout: Duration::from_millis(5000),
            notify_timeout: Duration::from_millis(5000),
            secret: None,
            secret_header: DEFAULT_SECRET_HEADER.to_string(),
        }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn with_notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = timeout;
        self
    }

    /// Requires callers to present the secret in `header`.
    pub fn with_secret(mut self, verifier: SharedSecretVerifier, header: impl Into<String>) -> Self {
        self.secret = Some(verifier);
        self.secret_header = header.into().to_lowercase();
        self
    }
}

/// Handler for Lojou sale webhooks.
pub struct IngestSaleEventHandler {
    sales: Arc<dyn SaleRepository>,
    goals: Arc<dyn GoalReader>,
    audit_log: Arc<dyn WebhookLogWriter>,
    notifier: Arc<dyn NotificationDispatcher>,
    policy: IngestionPolicy,
}

impl IngestSaleEventHandler {
    pub fn new(
        sales: Arc<dyn SaleRepository>,
        goals: Arc<dyn GoalReader>,
        audit_log: Arc<dyn WebhookLogWriter>,
        notifier: Arc<dyn NotificationDispatcher>,
        policy: IngestionPolicy,
    ) -> Self {
        Self {
            sales,
            goals,
            audit_log,
            notifier,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: IngestSaleEventCommand,
    ) -> Result<IngestSaleEventResult, IngestError> {
        let headers = redact_headers(&cmd.headers, &self.policy.secret_header);
        let raw_body = String::from_utf8_lossy(&cmd.body).into_owned();

        // 1. Audit before anything can fail
        self.audit(WebhookLogEntry::raw(&raw_body, headers.clone()))
            .await;

        // 2. Shared secret
        if let Some(verifier) = &self.policy.secret {
            let presented = cmd.headers.get(&self.policy.secret_header).map(String::as_str);
            if let Err(err) = verifier.verify(presented) {
                tracing::warn!(
                    header = %self.policy.secret_header,
                    "Rejected Lojou webhook: shared secret missing or wrong"
                );
                return Err(err);
            }
        }

        // 3. Parse
        let event = match SaleEvent::parse(&cmd.body) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, "Rejected Lojou webhook: body is not JSON");
                self.audit(WebhookLogEntry::error(
                    err.to_string(),
                    Value::String(raw_body),
                    headers,
                ))
                .await;
                return Err(err);
            }
        };
        self.audit(WebhookLogEntry::parsed(event.payload().clone(), headers.clone()))
            .await;

        match self.process(&event).await {
            Ok(result) => Ok(result),
            Err(err) => {
                tracing::error!(
                    error = %err,
                    retryable = err.is_retryable(),
                    "Lojou webhook processing failed"
                );
                self.audit(WebhookLogEntry::error(
                    err.to_string(),
                    event.payload().clone(),
                    headers,
                ))
                .await;
                Err(err)
            }
        }
    }

    async fn process(&self, event: &SaleEvent) -> Result<IngestSaleEventResult, IngestError> {
        // 4. Status gate
        let status = match event.status_class() {
            StatusClass::Accepted(status) => status,
            StatusClass::Ignored(status) => {
                tracing::info!(status = ?status, "Ignoring Lojou event");
                return Ok(IngestSaleEventResult::Ignored { status });
            }
        };

        let amount = event.amount()?;
        let external_id = event.external_id()?;

        // 5. Fast-path dedup; the insert below is the real guard
        if let Some(external_id) = &external_id {
            let existing = self
                .bounded("find_sale_by_external_id", self.sales.find_by_external_id(external_id))
                .await?;
            if existing.is_some() {
                tracing::info!(external_id = %external_id, "Duplicate Lojou event");
                return Ok(IngestSaleEventResult::Duplicate {
                    external_id: external_id.clone(),
                });
            }
        }

        // 6. Attribute and insert
        let owner = self.resolve_owner().await?;
        let sale = Sale::from_lojou(amount, event.description(), external_id, owner);

        match self.bounded("insert_sale", self.sales.insert(&sale)).await? {
            InsertResult::Inserted => {}
            InsertResult::AlreadyExists => {
                return match sale.external_id {
                    Some(external_id) => {
                        tracing::info!(
                            external_id = %external_id,
                            "Concurrent duplicate Lojou event"
                        );
                        Ok(IngestSaleEventResult::Duplicate { external_id })
                    }
                    None => Err(IngestError::Persistence(
                        "store reported a conflict for a sale without external id".to_string(),
                    )),
                };
            }
        }

        tracing::info!(
            sale_id = %sale.id,
            user_id = %sale.user_id,
            external_id = ?sale.external_id.as_ref().map(ExternalId::as_str),
            status = %status,
            amount = %sale.amount,
            "Recorded Lojou sale"
        );

        // 7. Notify
        self.notify(&sale, event.product_name()).await;

        Ok(IngestSaleEventResult::Recorded { sale })
    }

    async fn resolve_owner(&self) -> Result<UserId, IngestError> {
        let owner = self
            .bounded("find_annual_goal_owner", self.goals.active_annual_goal_owner())
            .await?;

        Ok(owner.unwrap_or_else(|| {
            tracing::debug!(
                user_id = %self.policy.default_owner,
                "No active annual goal, using default owner"
            );
            self.policy.default_owner.clone()
        }))
    }

    async fn notify(&self, sale: &Sale, product_name: &str) {
        let notification = Notification {
            user_id: sale.user_id.clone(),
            title: "💰 Venda Registrada!".to_string(),
            body: format!("Valor: {} MZN - {}", sale.amount, product_name),
            url: "/vendas".to_string(),
        };

        let limit = self.policy.notify_timeout;
        let result = match tokio::time::timeout(limit, self.notifier.dispatch(&notification)).await
        {
            Ok(result) => result,
            Err(_) => Err(NotificationError::Timeout(limit.as_millis() as u64)),
        };

        if let Err(err) = result {
            tracing::warn!(
                sale_id = %sale.id,
                user_id = %sale.user_id,
                error = %err,
                "Failed to send sale notification"
            );
        }
    }

    async fn audit(&self, entry: WebhookLogEntry) {
        let path = entry.path();
        if let Err(err) = self
            .bounded("append_webhook_log", self.audit_log.append(entry))
            .await
        {
            tracing::warn!(path, error = %err, "Failed to write webhook log");
        }
    }

    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        tokio::time::timeout(self.policy.store_timeout, call)
            .await
            .map_err(|_| DomainError::timeout(operation))?
    }
}

/// Copies headers for the audit log, masking credentials.
pub fn redact_headers(
    headers: &BTreeMap<String, String>,
    secret_header: &str,
) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let name = name.to_lowercase();
            let sensitive = CREDENTIAL_HEADERS.contains(&name.as_str()) || name == secret_header;
            let value = if sensitive {
                REDACTED.to_string()
            } else {
                value.clone()
            };
            (name, value)
        })
        .collect()
}
