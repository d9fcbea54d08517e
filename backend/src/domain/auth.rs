//! Login and registration inputs.
//!
//! Inbound adapters hand raw form strings to [`LoginCredentials::try_from_parts`]
//! and get back either validated credentials or the per-field messages to
//! show beside the form.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use zeroize::Zeroizing;

use super::user::Username;

/// Shortest accepted password, in characters.
pub const PASSWORD_MIN: usize = 6;

/// Whether the visitor signs in to an existing account or creates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginKind {
    /// Authenticate an existing account.
    Login,
    /// Create an account and sign in.
    Register,
}

impl FromStr for LoginKind {
    type Err = LoginValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "register" => Ok(Self::Register),
            _ => Err(LoginValidationError::InvalidKind),
        }
    }
}

impl fmt::Display for LoginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Login => "login",
            Self::Register => "register",
        })
    }
}

/// Messages keyed by the form field they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginFieldErrors {
    /// Problem with the username, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Problem with the password, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Reasons a login form cannot be acted on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// A required field was absent from the form.
    #[error("Form not submitted correctly.")]
    Incomplete,
    /// One or more fields failed validation.
    #[error("Invalid login details")]
    Fields(LoginFieldErrors),
    /// The `type` field was neither `login` nor `register`.
    #[error("Login type invalid")]
    InvalidKind,
}

/// A password held only as long as needed and wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a raw password. Whitespace is significant and kept.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message when the password is too short.
    pub fn new(raw: &str) -> Result<Self, String> {
        if raw.chars().count() < PASSWORD_MIN {
            return Err(format!(
                "Passwords must be at least {PASSWORD_MIN} characters long"
            ));
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Borrow the secret.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Validated login or registration request.
///
/// # Examples
/// ```
/// use funniest_domains::domain::{LoginCredentials, LoginKind};
///
/// let creds = LoginCredentials::try_from_parts("login", "ada", "hunter22")
///     .expect("valid credentials");
/// assert_eq!(creds.kind(), LoginKind::Login);
/// assert_eq!(creds.username().as_str(), "ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    kind: LoginKind,
    username: Username,
    password: Password,
}

impl LoginCredentials {
    /// Validate the raw `type`, `username` and `password` form values.
    ///
    /// Field problems are reported together; the login type is checked only
    /// once the fields are valid.
    ///
    /// # Errors
    ///
    /// Returns [`LoginValidationError::Fields`] listing every invalid field,
    /// or [`LoginValidationError::InvalidKind`] for an unknown type.
    pub fn try_from_parts(
        kind: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, LoginValidationError> {
        let username = Username::new(username);
        let password = Password::new(password);

        let mut errors = LoginFieldErrors::default();
        if let Err(error) = &username {
            errors.username = Some(error.to_string());
        }
        if let Err(message) = &password {
            errors.password = Some(message.clone());
        }

        match (username, password) {
            (Ok(username), Ok(password)) => Ok(Self {
                kind: kind.parse()?,
                username,
                password,
            }),
            _ => Err(LoginValidationError::Fields(errors)),
        }
    }

    /// Sign in or register.
    #[must_use]
    pub const fn kind(&self) -> LoginKind {
        self.kind
    }

    /// Validated username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Plain-text password, available to the credential hasher only.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }
}
