//! Driven port for password hashing.

use crate::domain::Password;

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing or verifying passwords.
    pub enum CredentialHasherError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Salted one-way password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash `password` with a fresh salt, returning a self-describing string.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialHasherError::Hash`] when hashing fails.
    fn hash(&self, password: &Password) -> Result<String, CredentialHasherError>;

    /// Check `password` against a hash produced by [`CredentialHasher::hash`].
    ///
    /// # Errors
    ///
    /// Returns [`CredentialHasherError::MalformedHash`] for unparseable hashes.
    fn verify(&self, password: &Password, hash: &str) -> Result<bool, CredentialHasherError>;
}
