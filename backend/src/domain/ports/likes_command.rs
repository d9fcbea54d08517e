//! Driving port for committing likes and unlikes.

use async_trait::async_trait;

use crate::domain::{DomainRecord, Error, PendingMutation, UserId};

/// Use-case port for like/unlike mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikesCommand: Send + Sync {
    /// Commit `mutation` on behalf of `user`.
    ///
    /// All-or-nothing: on error neither the relationship nor the counter
    /// has changed.
    async fn apply(&self, user: UserId, mutation: PendingMutation) -> Result<DomainRecord, Error>;
}
