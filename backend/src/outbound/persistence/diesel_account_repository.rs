//! PostgreSQL-backed account store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRepository, AccountRepositoryError, StoredAccount};
use crate::domain::{User, UserId, Username};

use super::diesel_error_mapping::{DieselErrorMapping, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel implementation of [`AccountRepository`].
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a repository on top of `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error, username: &str) -> AccountRepositoryError {
    DieselErrorMapping {
        query: AccountRepositoryError::query,
        connection: AccountRepositoryError::connection,
        unique_violation: || AccountRepositoryError::username_taken(username),
    }
    .map(error)
}

fn account_from_row(row: UserRow) -> Result<StoredAccount, AccountRepositoryError> {
    let username = Username::new(&row.username)
        .map_err(|err| AccountRepositoryError::query(format!("stored username: {err}")))?;
    Ok(StoredAccount {
        user: User::new(UserId::from_uuid(row.id), username),
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountRepositoryError::connection))?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, username.as_str()))?;

        row.map(account_from_row).transpose()
    }

    async fn create(&self, account: &StoredAccount) -> Result<(), AccountRepositoryError> {
        let username = account.user.username().as_str();
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountRepositoryError::connection))?;

        diesel::insert_into(users::table)
            .values(&NewUserRow {
                id: *account.user.id().as_uuid(),
                username,
                password_hash: &account.password_hash,
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, username))
    }
}
