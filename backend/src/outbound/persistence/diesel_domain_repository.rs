//! PostgreSQL-backed ranked store.
//!
//! Listing order is `likes desc, updated_at desc, id asc`. Likes are
//! committed in one transaction that locks the domain row, writes or
//! removes the relationship row and adjusts the counter.

use std::collections::HashSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::PageWindow;
use uuid::Uuid;

use crate::domain::ports::{DomainRepository, DomainRepositoryError};
use crate::domain::{DomainId, DomainName, DomainRecord, LikeAction, RankedDomain, UserId};

use super::diesel_error_mapping::{DieselErrorMapping, likes_from_db, map_pool_error};
use super::models::{DomainRow, NewDomainRow, NewLikeRow};
use super::pool::{DbPool, PoolError};
use super::schema::{domains, user_liked_domains};

/// Diesel implementation of [`DomainRepository`].
#[derive(Clone)]
pub struct DieselDomainRepository {
    pool: DbPool,
}

impl DieselDomainRepository {
    /// Create a repository on top of `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> DomainRepositoryError {
    map_pool_error(error, DomainRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> DomainRepositoryError {
    DieselErrorMapping {
        query: DomainRepositoryError::query,
        connection: DomainRepositoryError::connection,
        unique_violation: DomainRepositoryError::already_liked,
    }
    .map(error)
}

fn record_from_row(row: DomainRow) -> Result<DomainRecord, DomainRepositoryError> {
    let name = DomainName::parse(&row.name)
        .map_err(|err| DomainRepositoryError::query(format!("stored domain name: {err}")))?;
    let likes = likes_from_db(row.likes).map_err(DomainRepositoryError::query)?;
    Ok(DomainRecord {
        id: DomainId::from_uuid(row.id),
        name,
        likes,
        updated_at: row.updated_at,
    })
}

/// Failure inside the like transaction. Either variant rolls it back.
#[derive(Debug)]
enum LikeTxError {
    Diesel(diesel::result::Error),
    Rejected(DomainRepositoryError),
}

impl From<diesel::result::Error> for LikeTxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl LikeTxError {
    fn into_repository_error(self) -> DomainRepositoryError {
        match self {
            Self::Diesel(error) => map_diesel_error(error),
            Self::Rejected(error) => error,
        }
    }
}

#[async_trait]
impl DomainRepository for DieselDomainRepository {
    async fn list_ranked(
        &self,
        window: PageWindow,
        viewer: Option<UserId>,
    ) -> Result<Vec<RankedDomain>, DomainRepositoryError> {
        let offset = i64::try_from(window.offset())
            .map_err(|_| DomainRepositoryError::query("page offset out of range"))?;
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<DomainRow> = domains::table
            .select(DomainRow::as_select())
            .order((
                domains::likes.desc(),
                domains::updated_at.desc(),
                domains::id.asc(),
            ))
            .offset(offset)
            .limit(i64::from(window.limit()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let liked: HashSet<Uuid> = match viewer {
            Some(user) if !rows.is_empty() => {
                let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
                user_liked_domains::table
                    .filter(user_liked_domains::user_id.eq(*user.as_uuid()))
                    .filter(user_liked_domains::domain_id.eq_any(ids))
                    .select(user_liked_domains::domain_id)
                    .load::<Uuid>(&mut conn)
                    .await
                    .map_err(map_diesel_error)?
                    .into_iter()
                    .collect()
            }
            _ => HashSet::new(),
        };

        rows.into_iter()
            .map(|row| {
                let liked_by_viewer = liked.contains(&row.id);
                record_from_row(row).map(|record| RankedDomain {
                    record,
                    liked_by_viewer,
                })
            })
            .collect()
    }

    async fn count(&self) -> Result<u64, DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let total: i64 = domains::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(total).map_err(|_| DomainRepositoryError::query("negative row count"))
    }

    async fn find_like(
        &self,
        user: UserId,
        domain: DomainId,
    ) -> Result<bool, DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        diesel::select(diesel::dsl::exists(
            user_liked_domains::table
                .filter(user_liked_domains::user_id.eq(*user.as_uuid()))
                .filter(user_liked_domains::domain_id.eq(*domain.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn apply_like(
        &self,
        user: UserId,
        domain: DomainId,
        action: LikeAction,
    ) -> Result<DomainRecord, DomainRepositoryError> {
        let user_id = *user.as_uuid();
        let domain_id = *domain.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = conn
            .transaction::<DomainRow, LikeTxError, _>(|conn| {
                async move {
                    let locked = domains::table
                        .find(domain_id)
                        .select(DomainRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Err(LikeTxError::Rejected(DomainRepositoryError::not_found(
                            domain,
                        )));
                    }

                    let delta = match action {
                        LikeAction::Like => {
                            let inserted = diesel::insert_into(user_liked_domains::table)
                                .values(&NewLikeRow { user_id, domain_id })
                                .on_conflict_do_nothing()
                                .execute(conn)
                                .await?;
                            if inserted == 0 {
                                return Err(LikeTxError::Rejected(
                                    DomainRepositoryError::already_liked(),
                                ));
                            }
                            1
                        }
                        LikeAction::Unlike => {
                            let removed = diesel::delete(
                                user_liked_domains::table
                                    .filter(user_liked_domains::user_id.eq(user_id))
                                    .filter(user_liked_domains::domain_id.eq(domain_id)),
                            )
                            .execute(conn)
                            .await?;
                            if removed == 0 {
                                return Err(LikeTxError::Rejected(
                                    DomainRepositoryError::not_liked(),
                                ));
                            }
                            -1
                        }
                    };

                    let updated = diesel::update(domains::table.find(domain_id))
                        .set((
                            domains::likes.eq(domains::likes + delta),
                            domains::updated_at.eq(diesel::dsl::now),
                        ))
                        .returning(DomainRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(updated)
                }
                .scope_boxed()
            })
            .await
            .map_err(LikeTxError::into_repository_error)?;

        record_from_row(row)
    }

    async fn seed_if_empty(&self, names: &[DomainName]) -> Result<usize, DomainRepositoryError> {
        let now = chrono::Utc::now();
        let rows: Vec<NewDomainRow<'_>> = names
            .iter()
            .map(|name| NewDomainRow {
                id: Uuid::new_v4(),
                name: name.as_str(),
                likes: 0,
                updated_at: now,
            })
            .collect();
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        conn.transaction(|conn| {
            async move {
                let existing: i64 = domains::table.count().get_result(conn).await?;
                if existing > 0 || rows.is_empty() {
                    return Ok(0);
                }
                diesel::insert_into(domains::table)
                    .values(&rows)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;

    fn row(name: &str, likes: i32) -> DomainRow {
        DomainRow {
            id: Uuid::nil(),
            name: name.to_owned(),
            likes,
            updated_at: Utc
                .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn rows_convert_to_records() {
        let record = record_from_row(row("Penisland.net", 4)).expect("valid row");

        assert_eq!(record.name.as_str(), "Penisland.net");
        assert_eq!(record.likes, 4);
        assert_eq!(record.id, DomainId::from_uuid(Uuid::nil()));
    }

    #[rstest]
    #[case::negative_likes(row("Itscrap.com", -2))]
    #[case::invalid_name(row("nodot", 0))]
    fn corrupt_rows_are_query_errors(#[case] corrupt: DomainRow) {
        let err = record_from_row(corrupt).expect_err("corrupt row");
        assert!(matches!(err, DomainRepositoryError::Query { .. }));
    }

    #[rstest]
    fn rejected_transactions_keep_their_error() {
        let err = LikeTxError::Rejected(DomainRepositoryError::not_liked()).into_repository_error();
        assert_eq!(err, DomainRepositoryError::not_liked());
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let err = map_pool(PoolError::checkout("refused"));
        assert!(matches!(err, DomainRepositoryError::Connection { .. }));
    }
}
