//! Sign-in and registration over the account store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, CredentialHasher, CredentialHasherError,
    LoginService, StoredAccount,
};
use crate::domain::{Error, LoginCredentials, LoginKind, User, UserId};

/// Message returned for any failed sign-in.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid username or password";

/// Service implementing [`LoginService`].
#[derive(Clone)]
pub struct AccountsService<A, H> {
    accounts: Arc<A>,
    hasher: Arc<H>,
}

impl<A, H> AccountsService<A, H> {
    /// Create a service from an account store and a password hasher.
    pub fn new(accounts: Arc<A>, hasher: Arc<H>) -> Self {
        Self { accounts, hasher }
    }
}

impl<A, H> AccountsService<A, H>
where
    A: AccountRepository,
    H: CredentialHasher,
{
    fn map_account_error(error: AccountRepositoryError) -> Error {
        match error {
            AccountRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("account repository unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Error::internal(format!("account repository error: {message}"))
            }
            AccountRepositoryError::UsernameTaken { username } => {
                Error::conflict(format!("User with username {username} already exists"))
            }
        }
    }

    fn map_hasher_error(error: CredentialHasherError) -> Error {
        Error::internal(error.to_string())
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(account) = self
            .accounts
            .find_by_username(credentials.username())
            .await
            .map_err(Self::map_account_error)?
        else {
            return Err(Error::invalid_request(INVALID_LOGIN_MESSAGE));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .map_err(Self::map_hasher_error)?;
        if !matches {
            warn!(username = %credentials.username(), "rejected sign-in");
            return Err(Error::invalid_request(INVALID_LOGIN_MESSAGE));
        }
        Ok(account.user.id())
    }

    async fn register(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let username = credentials.username();
        let existing = self
            .accounts
            .find_by_username(username)
            .await
            .map_err(Self::map_account_error)?;
        if existing.is_some() {
            return Err(Self::map_account_error(
                AccountRepositoryError::username_taken(username.as_str()),
            ));
        }

        let password_hash = self
            .hasher
            .hash(credentials.password())
            .map_err(Self::map_hasher_error)?;
        let account = StoredAccount {
            user: User::new(UserId::random(), username.clone()),
            password_hash,
        };
        self.accounts
            .create(&account)
            .await
            .map_err(Self::map_account_error)?;
        info!(user = %account.user.id(), %username, "registered account");
        Ok(account.user.id())
    }
}

#[async_trait]
impl<A, H> LoginService for AccountsService<A, H>
where
    A: AccountRepository,
    H: CredentialHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        match credentials.kind() {
            LoginKind::Login => self.login(credentials).await,
            LoginKind::Register => self.register(credentials).await,
        }
    }
}
