//! Page-number pagination primitives.
//!
//! The ranked domain listing is addressed by a 1-based page number and a
//! fixed page size. This crate owns the arithmetic that turns those two
//! values into a store window (`offset`/`limit`), the total page count, and
//! the navigation links rendered next to a page.
//!
//! ```
//! use pagination::{OffsetStrategy, PageNumber, PageSize, PageWindow, page_count};
//!
//! let size = PageSize::new(1).expect("valid size");
//! let page = PageNumber::new(2).expect("valid page");
//! let window = PageWindow::for_page(page, size, OffsetStrategy::Standard);
//!
//! assert_eq!(window.offset(), 1);
//! assert_eq!(window.limit(), 1);
//! assert_eq!(page_count(3, size), 3);
//! ```

mod error;
mod links;
mod number;
mod window;

pub use error::PaginationError;
pub use links::PageLinks;
pub use number::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageNumber, PageRequest, PageSize};
pub use window::{OffsetStrategy, PageWindow, page_count};
