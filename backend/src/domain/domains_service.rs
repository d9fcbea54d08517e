//! Listing and like/unlike use-cases over the ranked store.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageNumber;
use tracing::{debug, info, warn};

use crate::domain::ports::{DomainRepository, DomainRepositoryError, DomainsQuery, LikesCommand};
use crate::domain::{
    DomainName, DomainRecord, DomainsPage, Error, LikeAction, ListingPolicy, PendingMutation,
    UserId,
};

/// Names inserted into an empty store at startup.
pub const SAMPLE_DOMAINS: [&str; 3] = ["Itscrap.com", "Whorepresents.com", "Penisland.net"];

/// Message shown when liking a domain twice.
pub const ALREADY_LIKED_MESSAGE: &str = "You've already liked this domain";
/// Message shown when withdrawing a like that does not exist.
pub const NOT_LIKED_MESSAGE: &str = "You haven't liked this domain";

/// Service implementing [`DomainsQuery`] and [`LikesCommand`].
#[derive(Clone)]
pub struct DomainsService<R> {
    repository: Arc<R>,
    policy: ListingPolicy,
}

impl<R> DomainsService<R> {
    /// Create a service over `repository` using `policy`.
    pub fn new(repository: Arc<R>, policy: ListingPolicy) -> Self {
        Self { repository, policy }
    }
}

impl<R> DomainsService<R>
where
    R: DomainRepository,
{
    fn map_repository_error(error: DomainRepositoryError) -> Error {
        match error {
            DomainRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("domain repository unavailable: {message}"))
            }
            DomainRepositoryError::Query { message } => {
                Error::internal(format!("domain repository error: {message}"))
            }
            DomainRepositoryError::NotFound { id } => {
                Error::not_found(format!("Domain {id} not found"))
            }
            DomainRepositoryError::AlreadyLiked => Error::conflict(ALREADY_LIKED_MESSAGE),
            DomainRepositoryError::NotLiked => Error::conflict(NOT_LIKED_MESSAGE),
        }
    }

    /// Insert [`SAMPLE_DOMAINS`] when the store holds no domains yet.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn seed_sample_domains(&self) -> Result<usize, Error> {
        let names = SAMPLE_DOMAINS
            .iter()
            .map(|name| DomainName::parse(name))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| Error::internal(format!("invalid sample domain: {err}")))?;
        let inserted = self
            .repository
            .seed_if_empty(&names)
            .await
            .map_err(Self::map_repository_error)?;
        if inserted > 0 {
            info!(inserted, "seeded sample domains");
        }
        Ok(inserted)
    }
}

#[async_trait]
impl<R> DomainsQuery for DomainsService<R>
where
    R: DomainRepository,
{
    async fn page(&self, viewer: Option<UserId>, page: PageNumber) -> Result<DomainsPage, Error> {
        let window = self.policy.window(page);
        let domains = self
            .repository
            .list_ranked(window, viewer)
            .await
            .map_err(Self::map_repository_error)?;
        let total = self
            .repository
            .count()
            .await
            .map_err(Self::map_repository_error)?;
        debug!(%page, offset = window.offset(), total, "loaded domain page");
        if self.policy.truncates(total) {
            warn!(
                total,
                shown = window.limit(),
                "unpaginated listing truncated"
            );
        }

        Ok(DomainsPage {
            domains,
            page,
            pages: self.policy.pages(total),
            is_logged_in: viewer.is_some(),
        })
    }

    fn policy(&self) -> ListingPolicy {
        self.policy
    }
}

#[async_trait]
impl<R> LikesCommand for DomainsService<R>
where
    R: DomainRepository,
{
    async fn apply(&self, user: UserId, mutation: PendingMutation) -> Result<DomainRecord, Error> {
        let PendingMutation { action, target } = mutation;
        let liked = self
            .repository
            .find_like(user, target)
            .await
            .map_err(Self::map_repository_error)?;
        match (action, liked) {
            (LikeAction::Like, true) => return Err(Error::conflict(ALREADY_LIKED_MESSAGE)),
            (LikeAction::Unlike, false) => return Err(Error::conflict(NOT_LIKED_MESSAGE)),
            _ => {}
        }

        let record = self
            .repository
            .apply_like(user, target, action)
            .await
            .map_err(Self::map_repository_error)?;
        info!(%user, domain = %target, %action, likes = record.likes, "like committed");
        Ok(record)
    }
}
