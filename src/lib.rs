//! Kaito Vision - Sales ingestion service
//!
//! Receives sale webhooks from the Lojou storefront, records each paid order
//! exactly once in the revenue ledger, and notifies the account owner.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
