//! Ranked domain records and the mutations a viewer can apply to them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use pagination::PageNumber;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DomainName;

/// Opaque identifier of a listed domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainId(Uuid);

impl DomainId {
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

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DomainId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A listed domain as held by the ranked store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    /// Identifier.
    pub id: DomainId,
    /// The domain name itself.
    pub name: DomainName,
    /// Committed like count.
    pub likes: u32,
    /// Last change to the record; breaks ties between equal like counts.
    pub updated_at: DateTime<Utc>,
}

/// A record paired with whether the current viewer has liked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedDomain {
    /// Underlying record.
    pub record: DomainRecord,
    /// Always `false` for anonymous viewers.
    pub liked_by_viewer: bool,
}

/// One page of the ranked listing as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainsPage {
    /// Records in rank order.
    pub domains: Vec<RankedDomain>,
    /// Page that was requested.
    pub page: PageNumber,
    /// Total number of populated pages.
    pub pages: u32,
    /// Whether the viewer is signed in.
    pub is_logged_in: bool,
}

/// A like or unlike requested by a signed-in viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    /// Add the viewer's like.
    Like,
    /// Withdraw the viewer's like.
    Unlike,
}

/// Raised when the `_action` form value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown like action '{0}'")]
pub struct UnknownLikeAction(pub String);

impl FromStr for LikeAction {
    type Err = UnknownLikeAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "unlike" => Ok(Self::Unlike),
            other => Err(UnknownLikeAction(other.to_owned())),
        }
    }
}

impl fmt::Display for LikeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Like => "like",
            Self::Unlike => "unlike",
        })
    }
}

/// A like/unlike in flight, not yet confirmed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMutation {
    /// What the viewer asked for.
    pub action: LikeAction,
    /// Domain the action targets.
    pub target: DomainId,
}

impl PendingMutation {
    /// Construct a pending mutation.
    #[must_use]
    pub const fn new(action: LikeAction, target: DomainId) -> Self {
        Self { action, target }
    }
}
