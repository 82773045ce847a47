//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `SaleRepository` - Append-only sale storage with duplicate detection
//! - `GoalReader` - Owner of the active annual goal
//! - `WebhookLogWriter` - Audit trail of inbound webhooks
//!
//! ## Outbound Ports
//!
//! - `NotificationDispatcher` - Push notification to the account owner

mod goal_reader;
mod notification_dispatcher;
mod sale_repository;
mod webhook_log_writer;

pub use goal_reader::GoalReader;
pub use notification_dispatcher::{Notification, NotificationDispatcher, NotificationError};
pub use sale_repository::{InsertResult, SaleRepository};
pub use webhook_log_writer::{WebhookLogEntry, WebhookLogStage, WebhookLogWriter};
