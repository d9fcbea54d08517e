//! Domain suggestions queued for moderation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{DomainName, UserId};

/// Identifier of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// A suggested domain awaiting moderation. Never listed automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSubmission {
    /// Identifier.
    pub id: SubmissionId,
    /// Suggested name.
    pub domain: DomainName,
    /// Account that made the suggestion.
    pub submitted_by: UserId,
    /// When the suggestion was received.
    pub created_at: DateTime<Utc>,
}
