//! Domain suggestion intake and confirmation lookup.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    SubmissionCommand, SubmissionQuery, SubmissionRepository, SubmissionRepositoryError,
};
use crate::domain::{DomainName, DomainSubmission, Error, SubmissionId, UserId};

/// Service implementing [`SubmissionCommand`] and [`SubmissionQuery`].
#[derive(Clone)]
pub struct SubmissionService<S> {
    repository: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> SubmissionService<S> {
    /// Create a service over `repository`, stamping submissions with `clock`.
    pub fn new(repository: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

fn map_repository_error(error: SubmissionRepositoryError) -> Error {
    match error {
        SubmissionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("submission repository unavailable: {message}"))
        }
        SubmissionRepositoryError::Query { message } => {
            Error::internal(format!("submission repository error: {message}"))
        }
        SubmissionRepositoryError::Duplicate { domain } => {
            Error::conflict(format!("You've already submitted the domain {domain}"))
        }
    }
}

#[async_trait]
impl<S> SubmissionCommand for SubmissionService<S>
where
    S: SubmissionRepository,
{
    async fn submit(&self, user: UserId, raw_domain: &str) -> Result<DomainSubmission, Error> {
        let domain = DomainName::parse(raw_domain).map_err(|err| {
            let message = err.to_string();
            Error::invalid_request(message.clone()).with_details(json!({
                "fieldErrors": { "domain": message },
                "fields": { "domain": raw_domain },
            }))
        })?;

        let submission = DomainSubmission {
            id: SubmissionId::random(),
            domain,
            submitted_by: user,
            created_at: self.clock.utc(),
        };
        self.repository
            .create(&submission)
            .await
            .map_err(map_repository_error)?;
        info!(%user, domain = %submission.domain, "domain submitted for moderation");
        Ok(submission)
    }
}

#[async_trait]
impl<S> SubmissionQuery for SubmissionService<S>
where
    S: SubmissionRepository,
{
    async fn find(
        &self,
        user: UserId,
        domain: &DomainName,
    ) -> Result<Option<DomainSubmission>, Error> {
        self.repository
            .find(user, domain)
            .await
            .map_err(map_repository_error)
    }
}
