//! `303 See Other` responses and the locations handlers redirect to.

use actix_web::HttpResponse;
use actix_web::http::header;
use pagination::PageNumber;
use url::form_urlencoded;

/// Base path of the listing.
pub const DOMAINS_PATH: &str = "/domains";
/// Login form.
pub const LOGIN_PATH: &str = "/domains/login";
/// Submission confirmation page.
pub const SUBMIT_SUCCESS_PATH: &str = "/domains/submit/success";

/// Redirect with `303 See Other`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn with_page(path: &str, page: Option<PageNumber>) -> String {
    match page {
        Some(page) => format!("{path}?page={page}"),
        None => path.to_owned(),
    }
}

/// The login form, carrying the page the visitor came from.
pub fn login_location(page: Option<PageNumber>) -> String {
    with_page(LOGIN_PATH, page)
}

/// The listing, optionally at a specific page.
pub fn domains_location(page: Option<PageNumber>) -> String {
    with_page(DOMAINS_PATH, page)
}

/// The listing with the exact query string of the current request.
pub fn domains_with_query(query: &str) -> String {
    if query.is_empty() {
        DOMAINS_PATH.to_owned()
    } else {
        format!("{DOMAINS_PATH}?{query}")
    }
}

/// The confirmation page for `domain`, URL-encoded.
pub fn submit_success_location(domain: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("domain", domain)
        .finish();
    format!("{SUBMIT_SUCCESS_PATH}?{query}")
}
