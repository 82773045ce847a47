//! Error types for sale webhook ingestion.
//!
//! Defines the error conditions that end an ingestion request, with HTTP
//! status code mapping and retryability semantics.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors that end a sale ingestion request.
///
/// Duplicate and ignored events are not errors; they are successful
/// outcomes of the ingestion handler.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Request body is not valid JSON.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Accepted event without a usable amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Platform identifier collides with the reserved reversal namespace.
    #[error("Invalid external id: {0}")]
    InvalidExternalId(String),

    /// Shared secret missing or wrong.
    #[error("Invalid webhook secret")]
    Unauthorized,

    /// A durable store call failed or timed out.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl IngestError {
    /// Returns true if the platform should retry delivering this event.
    pub fn is_retryable(&self) -> bool {
        matches!(self, IngestError::Persistence(_))
    }

    /// Maps the error to an HTTP status code.
    ///
    /// Only a body that is not JSON is a 400. A JSON event whose fields
    /// cannot be recorded is an unexpected failure and answers 500, like a
    /// store failure; `is_retryable` tells them apart in the logs.
    pub fn status_code(&self) -> StatusCode {
        match self {
            IngestError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            IngestError::Unauthorized => StatusCode::UNAUTHORIZED,
            IngestError::InvalidAmount(_)
            | IngestError::InvalidExternalId(_)
            | IngestError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for IngestError {
    fn from(err: DomainError) -> Self {
        IngestError::Persistence(err.to_string())
    }
}
