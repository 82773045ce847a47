//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod ingestion;
pub mod sales;

pub use ingestion::{
    IngestSaleEventCommand, IngestSaleEventHandler, IngestSaleEventResult, IngestionPolicy,
};
pub use sales::{RecordSaleReversalCommand, RecordSaleReversalHandler, RecordSaleReversalResult};
