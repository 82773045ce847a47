//! In-memory adapters for testing.
//!
//! # Security Note
//!
//! These adapters are for **testing and local runs only**. Test helpers use
//! `.expect()` on lock operations and will panic if a lock is poisoned.

mod goal_reader;
mod notification_dispatcher;
mod sale_repository;
mod webhook_log;

pub use goal_reader::InMemoryGoalReader;
pub use notification_dispatcher::RecordingNotificationDispatcher;
pub use sale_repository::InMemorySaleRepository;
pub use webhook_log::InMemoryWebhookLog;
