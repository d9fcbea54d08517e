//! Argon2id implementation of [`CredentialHasher`].
//!
//! Hashes are stored in PHC string form, so each one carries its own
//! salt and cost parameters and verification never depends on the
//! parameters the hasher was built with.

use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use password_hash::SaltString;
use password_hash::rand_core::OsRng;

use crate::domain::Password;
use crate::domain::ports::{CredentialHasher, CredentialHasherError};

/// Argon2id hasher. Defaults to m=19 MiB, t=2, p=1.
#[derive(Clone)]
pub struct Argon2CredentialHasher {
    params: Params,
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2CredentialHasher {
    /// Hasher with the recommended default cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit cost parameters, e.g. a cheap profile for tests.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::default(), self.params.clone())
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &Password) -> Result<String, CredentialHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        self.hasher()
            .hash_password(password.expose().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialHasherError::hash(err.to_string()))
    }

    fn verify(&self, password: &Password, hash: &str) -> Result<bool, CredentialHasherError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|err| CredentialHasherError::malformed_hash(err.to_string()))?;
        match self
            .hasher()
            .verify_password(password.expose().as_bytes(), &parsed)
        {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialHasherError::hash(err.to_string())),
        }
    }
}
