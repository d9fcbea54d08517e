//! Driving port for reading the ranked listing.

use async_trait::async_trait;
use pagination::PageNumber;

use crate::domain::{DomainsPage, Error, ListingPolicy, UserId};

/// Use-case port for listing domains.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainsQuery: Send + Sync {
    /// Load `page` of the ranked listing as seen by `viewer`.
    ///
    /// Pages beyond the last one are empty, not errors.
    async fn page(&self, viewer: Option<UserId>, page: PageNumber) -> Result<DomainsPage, Error>;

    /// Listing capabilities in force.
    fn policy(&self) -> ListingPolicy;
}
