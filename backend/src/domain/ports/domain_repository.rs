//! Driven port for the ranked domain store.
//!
//! Adapters own ordering (`likes desc, updated_at desc`), windowing and the
//! atomic like/unlike commit. The service layer never composes the count
//! change and the relationship row itself.

use async_trait::async_trait;
use pagination::PageWindow;

use crate::domain::{DomainId, DomainName, DomainRecord, LikeAction, RankedDomain, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ranked store adapters.
    pub enum DomainRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "domain repository connection failed: {message}",
        /// A query or mutation failed.
        Query { message: String } => "domain repository query failed: {message}",
        /// No domain has the given identifier.
        NotFound { id: DomainId } => "domain {id} not found",
        /// The viewer already likes the domain.
        AlreadyLiked => "domain already liked by this user",
        /// The viewer has no like to withdraw.
        NotLiked => "domain not liked by this user",
    }
}

/// Persistence for listed domains and per-user likes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Fetch the records in `window`, in rank order, flagging those `viewer`
    /// has liked.
    async fn list_ranked(
        &self,
        window: PageWindow,
        viewer: Option<UserId>,
    ) -> Result<Vec<RankedDomain>, DomainRepositoryError>;

    /// Total number of listed domains.
    async fn count(&self) -> Result<u64, DomainRepositoryError>;

    /// Whether `user` currently likes `domain`.
    async fn find_like(
        &self,
        user: UserId,
        domain: DomainId,
    ) -> Result<bool, DomainRepositoryError>;

    /// Commit a like or unlike atomically: the relationship row and the
    /// counter change together, and `updated_at` is bumped. Returns the
    /// updated record.
    async fn apply_like(
        &self,
        user: UserId,
        domain: DomainId,
        action: LikeAction,
    ) -> Result<DomainRecord, DomainRepositoryError>;

    /// Insert `names` with zero likes when the store is empty. Returns the
    /// number of rows inserted.
    async fn seed_if_empty(&self, names: &[DomainName]) -> Result<usize, DomainRepositoryError>;
}
