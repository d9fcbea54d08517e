//! Validated page numbers and page sizes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::PaginationError;

/// Page size used by the production listing.
pub const DEFAULT_PAGE_SIZE: u32 = 1;

/// Largest page size a caller may configure.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A 1-based page number.
///
/// Pages past the last populated page are still valid page numbers; they
/// simply address an empty slice of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Validate and construct a page number.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPage`] when `value` is zero.
    pub const fn new(value: u32) -> Result<Self, PaginationError> {
        if value == 0 {
            return Err(PaginationError::ZeroPage);
        }
        Ok(Self(value))
    }

    /// Numeric value of the page.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The page before this one, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        if self.0 > 1 { Some(Self(self.0 - 1)) } else { None }
    }

    /// The page after this one, saturating at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageNumber {
    type Err = PaginationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| PaginationError::InvalidPage {
                value: s.to_owned(),
            })?;
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for PageNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Number of records per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PageSize(u32);

impl PageSize {
    /// Validate and construct a page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] for zero and
    /// [`PaginationError::PageSizeTooLarge`] above [`MAX_PAGE_SIZE`].
    pub const fn new(value: u32) -> Result<Self, PaginationError> {
        if value == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        if value > MAX_PAGE_SIZE {
            return Err(PaginationError::PageSizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self(value))
    }

    /// Numeric value of the page size.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

/// Query-string extractor for `?page=N`.
///
/// Text values are accepted because query strings carry no type
/// information; an absent parameter resolves to the first page.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested page, when present.
    #[serde(default)]
    pub page: Option<PageNumber>,
}

impl PageRequest {
    /// The requested page, defaulting to the first.
    #[must_use]
    pub fn page_or_first(self) -> PageNumber {
        self.page.unwrap_or_default()
    }
}
