//! Capabilities of the domain listing, selected by configuration.

use pagination::{OffsetStrategy, PageNumber, PageSize, PageWindow, page_count};

/// Upper bound on records returned when pagination is switched off.
pub const FULL_LIST_LIMIT: u32 = 10_000;

/// How the ranked listing is exposed.
///
/// # Examples
/// ```
/// use funniest_domains::domain::ListingPolicy;
/// use pagination::PageNumber;
///
/// let policy = ListingPolicy::default();
/// let window = policy.window(PageNumber::FIRST);
/// assert_eq!(window.offset(), 0);
/// assert_eq!(policy.pages(3), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingPolicy {
    /// Anonymous visitors are sent to the login page.
    pub require_login: bool,
    /// Show every domain on one page when `false`.
    pub paginated: bool,
    /// Records per page.
    pub page_size: PageSize,
    /// Page-to-offset formula.
    pub offset_strategy: OffsetStrategy,
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self::paginated(PageSize::default())
    }
}

impl ListingPolicy {
    /// Paginated, anonymous-friendly listing with the given size.
    #[must_use]
    pub fn paginated(page_size: PageSize) -> Self {
        Self {
            require_login: false,
            paginated: true,
            page_size,
            offset_strategy: OffsetStrategy::Standard,
        }
    }

    /// Store window for `page`.
    ///
    /// An unpaginated listing is a single window of at most
    /// [`FULL_LIST_LIMIT`] records; rows ranked below that are not shown
    /// even though [`Self::pages`] still reports one page. See
    /// [`Self::truncates`].
    #[must_use]
    pub fn window(&self, page: PageNumber) -> PageWindow {
        if self.paginated {
            PageWindow::for_page(page, self.page_size, self.offset_strategy)
        } else {
            PageWindow::everything(FULL_LIST_LIMIT)
        }
    }

    /// Number of pages needed for `total` records.
    #[must_use]
    pub fn pages(&self, total: u64) -> u32 {
        if self.paginated {
            page_count(total, self.page_size)
        } else {
            1
        }
    }

    /// Whether an unpaginated listing of `total` records hides the tail
    /// beyond [`FULL_LIST_LIMIT`].
    #[must_use]
    pub fn truncates(&self, total: u64) -> bool {
        !self.paginated && total > u64::from(FULL_LIST_LIMIT)
    }
}
