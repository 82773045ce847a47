//! In-memory goal reader.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::GoalReader;

/// Fixed-answer implementation of `GoalReader`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGoalReader {
    owner: Option<UserId>,
    failing: bool,
}

impl InMemoryGoalReader {
    /// No active annual goal.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An active annual goal owned by `owner`.
    pub fn with_owner(owner: UserId) -> Self {
        Self {
            owner: Some(owner),
            failing: false,
        }
    }

    /// Every lookup fails with a database error.
    pub fn failing() -> Self {
        Self {
            owner: None,
            failing: true,
        }
    }
}

#[async_trait]
impl GoalReader for InMemoryGoalReader {
    async fn active_annual_goal_owner(&self) -> Result<Option<UserId>, DomainError> {
        if self.failing {
            return Err(DomainError::database("goal store unavailable"));
        }
        Ok(self.owner.clone())
    }
}
