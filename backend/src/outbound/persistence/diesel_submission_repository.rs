//! PostgreSQL-backed moderation queue.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SubmissionRepository, SubmissionRepositoryError};
use crate::domain::{DomainName, DomainSubmission, SubmissionId, UserId};

use super::diesel_error_mapping::{DieselErrorMapping, map_pool_error};
use super::models::{NewSubmissionRow, SubmissionRow};
use super::pool::DbPool;
use super::schema::domain_submissions;

/// Diesel implementation of [`SubmissionRepository`].
#[derive(Clone)]
pub struct DieselSubmissionRepository {
    pool: DbPool,
}

impl DieselSubmissionRepository {
    /// Create a repository on top of `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error, domain: &str) -> SubmissionRepositoryError {
    DieselErrorMapping {
        query: SubmissionRepositoryError::query,
        connection: SubmissionRepositoryError::connection,
        unique_violation: || SubmissionRepositoryError::duplicate(domain),
    }
    .map(error)
}

fn submission_from_row(row: SubmissionRow) -> Result<DomainSubmission, SubmissionRepositoryError> {
    let domain = DomainName::parse(&row.domain)
        .map_err(|err| SubmissionRepositoryError::query(format!("stored domain name: {err}")))?;
    Ok(DomainSubmission {
        id: SubmissionId::from_uuid(row.id),
        domain,
        submitted_by: UserId::from_uuid(row.submitted_by),
        created_at: row.created_at,
    })
}

#[async_trait]
impl SubmissionRepository for DieselSubmissionRepository {
    async fn create(&self, submission: &DomainSubmission) -> Result<(), SubmissionRepositoryError> {
        let domain = submission.domain.as_str();
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SubmissionRepositoryError::connection))?;

        diesel::insert_into(domain_submissions::table)
            .values(&NewSubmissionRow {
                id: *submission.id.as_uuid(),
                domain,
                submitted_by: *submission.submitted_by.as_uuid(),
                created_at: submission.created_at,
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, domain))
    }

    async fn find(
        &self,
        user: UserId,
        domain: &DomainName,
    ) -> Result<Option<DomainSubmission>, SubmissionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SubmissionRepositoryError::connection))?;

        let row: Option<SubmissionRow> = domain_submissions::table
            .filter(domain_submissions::submitted_by.eq(*user.as_uuid()))
            .filter(domain_submissions::domain.eq(domain.as_str()))
            .select(SubmissionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, domain.as_str()))?;

        row.map(submission_from_row).transpose()
    }
}
