//! Driven port for registered accounts and their password hashes.

use async_trait::async_trait;

use crate::domain::{User, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account adapters.
    pub enum AccountRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "account repository connection failed: {message}",
        /// A query or insert failed.
        Query { message: String } => "account repository query failed: {message}",
        /// Another account already uses the username.
        UsernameTaken { username: String } => "username {username} already taken",
    }
}

/// An account together with its stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAccount {
    /// The account.
    pub user: User,
    /// PHC-format password hash.
    pub password_hash: String,
}

/// Persistence for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find the account registered under `username`.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError>;

    /// Register a new account; usernames are unique.
    async fn create(&self, account: &StoredAccount) -> Result<(), AccountRepositoryError>;
}
