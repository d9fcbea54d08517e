//! Mapping page numbers onto store windows.

use serde::{Deserialize, Serialize};

use crate::{PageNumber, PageSize};

/// How a page number is translated into a store offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetStrategy {
    /// `offset = size * (page - 1)`; page 1 starts at the top record.
    #[default]
    Standard,
    /// `offset = size * page - 1`, saturating at zero.
    ///
    /// Kept for parity with deployments that shipped this formula. With a
    /// page size above one it skips records between pages.
    Legacy,
}

/// A slice of the ranked store expressed as `offset`/`limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: u64,
    limit: u32,
}

impl PageWindow {
    /// Compute the window for `page` at the given `size`.
    #[must_use]
    pub fn for_page(page: PageNumber, size: PageSize, strategy: OffsetStrategy) -> Self {
        let size_value = u64::from(size.get());
        let page_value = u64::from(page.get());
        let offset = match strategy {
            OffsetStrategy::Standard => size_value.saturating_mul(page_value - 1),
            OffsetStrategy::Legacy => size_value.saturating_mul(page_value).saturating_sub(1),
        };
        Self {
            offset,
            limit: size.get(),
        }
    }

    /// A window covering every record up to `limit`.
    #[must_use]
    pub const fn everything(limit: u32) -> Self {
        Self { offset: 0, limit }
    }

    /// Number of records to skip.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }

    /// Maximum number of records to return.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }
}

/// Total number of pages needed to show `total` records.
///
/// An empty store has zero pages.
#[must_use]
pub fn page_count(total: u64, size: PageSize) -> u32 {
    let pages = total.div_ceil(u64::from(size.get()));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
