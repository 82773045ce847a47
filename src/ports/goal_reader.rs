//! GoalReader port - Resolves the account that owns keyless sales.
//!
//! The dashboard is single-tenant: the owner of the active annual revenue
//! goal is the account every ingested sale is attributed to.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};

/// Read-only access to goals.
#[async_trait]
pub trait GoalReader: Send + Sync {
    /// Owner of the active annual goal, if one exists.
    ///
    /// When several are active, the oldest wins.
    async fn active_annual_goal_owner(&self) -> Result<Option<UserId>, DomainError>;
}
