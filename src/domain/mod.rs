//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `sales` - Sale entity and reversal rules
//! - `ingestion` - Lojou webhook payload handling

pub mod foundation;
pub mod ingestion;
pub mod sales;
