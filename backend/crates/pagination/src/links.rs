//! Navigation links for a page of results.

use serde::Serialize;
use url::form_urlencoded;

use crate::PageNumber;

/// Previous/next controls rendered beside a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    /// Page being shown.
    pub current: u32,
    /// Total number of populated pages.
    pub pages: u32,
    /// Query string for the previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    /// Query string for the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl PageLinks {
    /// Build links for `current` out of `pages`.
    ///
    /// A page beyond the last one still links back to the page before it
    /// but never forward.
    #[must_use]
    pub fn new(current: PageNumber, pages: u32) -> Self {
        let prev = current.previous().map(query_for);
        let next = (current.get() < pages).then(|| query_for(current.next()));
        Self {
            current: current.get(),
            pages,
            prev,
            next,
        }
    }
}

fn query_for(page: PageNumber) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("page", &page.to_string())
        .finish();
    format!("?{query}")
}
