//! Notification adapters.
//!
//! - `EdgeFunctionNotificationDispatcher` - Calls the `send-notification` function
//! - `DisabledNotificationDispatcher` - Used when notifications are turned off

mod disabled;
mod edge_function_dispatcher;

pub use disabled::DisabledNotificationDispatcher;
pub use edge_function_dispatcher::{EdgeFunctionConfig, EdgeFunctionNotificationDispatcher};
