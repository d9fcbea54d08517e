//! Account identity: user ids, usernames and the user aggregate.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shortest accepted username, in characters.
pub const USERNAME_MIN: usize = 3;
/// Longest accepted username, in characters.
pub const USERNAME_MAX: usize = 64;

/// Validation errors for user identity values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier is not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The username is shorter than [`USERNAME_MIN`].
    #[error("Usernames must be at least {min} characters long")]
    UsernameTooShort {
        /// Minimum length.
        min: usize,
    },
    /// The username is longer than [`USERNAME_MAX`].
    #[error("Usernames must be at most {max} characters long")]
    UsernameTooLong {
        /// Maximum length.
        max: usize,
    },
}

/// Stable user identifier stored as a UUID.
///
/// Serialised as its hyphenated string form so it can live in a session
/// cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from text.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::InvalidId`] when `id` is not a UUID.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Login name chosen at registration.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed.
/// - Length is within [`USERNAME_MIN`]..=[`USERNAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    ///
    /// # Errors
    ///
    /// Returns a length error when the trimmed value is out of range.
    ///
    /// # Examples
    /// ```
    /// use funniest_domains::domain::Username;
    ///
    /// assert!(Username::new("  ada ").is_ok());
    /// assert!(Username::new("al").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the username text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A registered account. The password hash never leaves persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
}

impl User {
    /// Build a user from validated parts.
    #[must_use]
    pub const fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", false)]
    #[case("not-a-uuid", false)]
    #[case("", false)]
    fn user_id_parsing(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(UserId::new(raw).is_ok(), ok);
    }

    #[rstest]
    fn user_id_round_trips_through_strings() {
        let id = UserId::random();
        let text: String = id.into();
        assert_eq!(UserId::try_from(text), Ok(id));
    }

    #[rstest]
    #[case("ab", Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN }))]
    #[case("  ab  ", Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN }))]
    #[case("abc", Ok("abc"))]
    #[case(" jo e ", Ok("jo e"))]
    fn username_validation(
        #[case] raw: &str,
        #[case] expected: Result<&str, UserValidationError>,
    ) {
        let result = Username::new(raw);
        assert_eq!(result.as_ref().map(Username::as_str), expected.as_ref().map(|s| *s));
    }

    #[rstest]
    fn username_rejects_overlong_values() {
        let raw = "x".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(raw),
            Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
        );
    }

    #[rstest]
    fn short_username_message_is_user_facing() {
        let error = Username::new("a").expect_err("too short");
        assert_eq!(error.to_string(), "Usernames must be at least 3 characters long");
    }
}
