//! Sale webhook ingestion domain.
//!
//! # Module Structure
//!
//! - `sale_event` - Lenient extraction of fields from the Lojou payload
//! - `status` - Accepted-status classification
//! - `secret_verifier` - Optional shared-secret check
//! - `errors` - Terminal ingestion errors and their HTTP mapping

mod errors;
mod sale_event;
mod secret_verifier;
mod status;

pub use errors::IngestError;
pub use sale_event::{coerce_amount, SaleEvent, DEFAULT_CUSTOMER_EMAIL, DEFAULT_PRODUCT_NAME};
pub use secret_verifier::SharedSecretVerifier;
pub use status::{StatusClass, ACCEPTED_STATUSES};
