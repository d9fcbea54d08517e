//! Driven port for the moderation queue of suggested domains.

use async_trait::async_trait;

use crate::domain::{DomainName, DomainSubmission, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by submission adapters.
    pub enum SubmissionRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "submission repository connection failed: {message}",
        /// A query or insert failed.
        Query { message: String } => "submission repository query failed: {message}",
        /// The same user already suggested this domain.
        Duplicate { domain: String } => "domain {domain} already submitted by this user",
    }
}

/// Persistence for domain submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Store a new submission; `(domain, submitted_by)` is unique.
    async fn create(&self, submission: &DomainSubmission) -> Result<(), SubmissionRepositoryError>;

    /// Look up the submission of `domain` made by `user`.
    async fn find(
        &self,
        user: UserId,
        domain: &DomainName,
    ) -> Result<Option<DomainSubmission>, SubmissionRepositoryError>;
}
