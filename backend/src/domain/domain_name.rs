//! Candidate domain names submitted for moderation.
//!
//! Rules are checked in order and the first failure is reported:
//! overall length, leading/trailing hyphen, presence of a dot, then each
//! label's length and character set.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Longest accepted domain name, in characters.
pub const DOMAIN_NAME_MAX: usize = 253;
/// Longest accepted label, in characters.
pub const LABEL_MAX: usize = 63;

static LABEL_RE: OnceLock<Regex> = OnceLock::new();

fn label_regex() -> &'static Regex {
    LABEL_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9-]+$")
            .unwrap_or_else(|error| panic!("label regex failed to compile: {error}"))
    })
}

/// Why a candidate domain name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainNameError {
    /// Longer than [`DOMAIN_NAME_MAX`].
    #[error("Domains must be shorter than 254 characters")]
    TooLong,
    /// Starts or ends with `-`.
    #[error("Domains must not commence or end with a hyphen")]
    EdgeHyphen,
    /// No `.` separator.
    #[error("Domains must have at least one [.]")]
    MissingDot,
    /// A label exceeds [`LABEL_MAX`].
    #[error(
        "Labels must be shorter than 64 characters and the '{label}' label is {length} characters long."
    )]
    LabelTooLong {
        /// Offending label.
        label: String,
        /// Its length in characters.
        length: usize,
    },
    /// A label is empty or contains characters outside `[A-Za-z0-9-]`.
    #[error(
        "Only alphanumeric characters and hyphens can be used in labels and the '{label}' label has other forbidden characters."
    )]
    ForbiddenCharacters {
        /// Offending label.
        label: String,
    },
}

/// A syntactically valid domain name, stored as entered (case preserved).
///
/// # Examples
/// ```
/// use funniest_domains::domain::DomainName;
///
/// assert!(DomainName::parse("example.com").is_ok());
/// assert!(DomainName::parse("-bad.com").is_err());
/// assert!(DomainName::parse("onlylabel").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Validate a candidate name exactly as given. Surrounding whitespace
    /// belongs to the first or last label and is rejected there.
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainNameError`] rule the candidate breaks.
    pub fn parse(raw: &str) -> Result<Self, DomainNameError> {
        if raw.chars().count() > DOMAIN_NAME_MAX {
            return Err(DomainNameError::TooLong);
        }
        if raw.starts_with('-') || raw.ends_with('-') {
            return Err(DomainNameError::EdgeHyphen);
        }
        if !raw.contains('.') {
            return Err(DomainNameError::MissingDot);
        }
        for label in raw.split('.') {
            let length = label.chars().count();
            if length > LABEL_MAX {
                return Err(DomainNameError::LabelTooLong {
                    label: label.to_owned(),
                    length,
                });
            }
            if !label_regex().is_match(label) {
                return Err(DomainNameError::ForbiddenCharacters {
                    label: label.to_owned(),
                });
            }
        }
        Ok(Self(raw.to_owned()))
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DomainName {
    type Error = DomainNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
