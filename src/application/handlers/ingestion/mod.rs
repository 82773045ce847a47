//! Ingestion handlers.
//!
//! ## Commands
//! - Ingesting a Lojou sale webhook

mod ingest_sale_event;

pub use ingest_sale_event::{
    redact_headers, IngestSaleEventCommand, IngestSaleEventHandler, IngestSaleEventResult,
    IngestionPolicy, DEFAULT_SECRET_HEADER,
};
