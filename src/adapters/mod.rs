//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes for the webhook endpoints
//! - `postgres` - sqlx-backed stores
//! - `notification` - Edge function notification dispatch
//! - `memory` - In-memory stores for tests and local runs

pub mod http;
pub mod memory;
pub mod notification;
pub mod postgres;

pub use notification::{
    DisabledNotificationDispatcher, EdgeFunctionConfig, EdgeFunctionNotificationDispatcher,
};
pub use postgres::{PostgresGoalReader, PostgresSaleRepository, PostgresWebhookLogWriter};
