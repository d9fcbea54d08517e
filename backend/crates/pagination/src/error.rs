//! Errors raised while validating pagination input.

use thiserror::Error;

/// Invalid pagination input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaginationError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one record.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// The requested page size exceeds the supported maximum.
    #[error("page size must not exceed {max}")]
    PageSizeTooLarge {
        /// Largest accepted page size.
        max: u32,
    },
    /// The page parameter is not a positive integer.
    #[error("page must be a positive integer, got '{value}'")]
    InvalidPage {
        /// The rejected raw value.
        value: String,
    },
}
