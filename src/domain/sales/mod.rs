//! Sales domain module.
//!
//! - `sale` - Sale entity and reversal rules
//! - `origin` - Source tag stored with each sale

mod origin;
mod sale;

pub use origin::SaleOrigin;
pub use sale::Sale;
