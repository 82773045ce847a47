//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresSaleRepository` - Sales with unique-index duplicate detection
//! - `PostgresGoalReader` - Owner of the active annual goal
//! - `PostgresWebhookLogWriter` - Webhook audit trail

mod goal_reader;
mod sale_repository;
mod webhook_log_writer;

pub use goal_reader::PostgresGoalReader;
pub use sale_repository::PostgresSaleRepository;
pub use webhook_log_writer::PostgresWebhookLogWriter;
