//! Driving ports for suggesting domains and confirming suggestions.

use async_trait::async_trait;

use crate::domain::{DomainName, DomainSubmission, Error, UserId};

/// Use-case port for suggesting a domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionCommand: Send + Sync {
    /// Validate `raw_domain` and queue it for moderation.
    async fn submit(&self, user: UserId, raw_domain: &str) -> Result<DomainSubmission, Error>;
}

/// Use-case port for the confirmation page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionQuery: Send + Sync {
    /// The submission of `domain` by `user`, if it exists.
    async fn find(&self, user: UserId, domain: &DomainName)
    -> Result<Option<DomainSubmission>, Error>;
}
