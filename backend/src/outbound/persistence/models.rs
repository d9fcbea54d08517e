//! Diesel row structs. Internal to the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{domain_submissions, domains, user_liked_domains, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// Row inserted into `users`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Row read from `domains`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = domains)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DomainRow {
    pub id: Uuid,
    pub name: String,
    pub likes: i32,
    pub updated_at: DateTime<Utc>,
}

/// Row inserted into `domains`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = domains)]
pub(crate) struct NewDomainRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub likes: i32,
    pub updated_at: DateTime<Utc>,
}

/// Row inserted into `user_liked_domains`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_liked_domains)]
pub(crate) struct NewLikeRow {
    pub user_id: Uuid,
    pub domain_id: Uuid,
}

/// Row read from `domain_submissions`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = domain_submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubmissionRow {
    pub id: Uuid,
    pub domain: String,
    pub submitted_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Row inserted into `domain_submissions`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = domain_submissions)]
pub(crate) struct NewSubmissionRow<'a> {
    pub id: Uuid,
    pub domain: &'a str,
    pub submitted_by: Uuid,
    pub created_at: DateTime<Utc>,
}
