//! Sale handlers.
//!
//! ## Commands
//! - Recording a reversal of an existing sale

mod record_sale_reversal;

pub use record_sale_reversal::{
    RecordSaleReversalCommand, RecordSaleReversalHandler, RecordSaleReversalResult,
};
