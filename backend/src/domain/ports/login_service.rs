//! Driving port for signing in and registering.
//!
//! Inbound adapters call this port with validated credentials and receive
//! the user id to store in the session, without touching persistence or
//! hashing directly.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Sign in or register, depending on the credentials' kind.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
