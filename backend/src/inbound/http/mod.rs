//! HTTP inbound adapter serving the `/domains` pages as JSON loader data.

pub mod domains;
pub mod error;
pub mod health;
pub mod login;
pub mod redirect;
pub mod session;
pub mod session_config;
pub mod state;
pub mod submissions;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

use actix_web::web;
use tracing::debug;

use crate::domain::Error;

/// Message for a query string that does not name a valid page.
pub const INVALID_PAGE_MESSAGE: &str = "Invalid page";

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected query string");
        Error::invalid_request(INVALID_PAGE_MESSAGE).into()
    })
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected form body");
        Error::invalid_request(domains::INVALID_BODY_MESSAGE).into()
    })
}

/// Register every handler under the scope this is configured on, normally
/// `/domains`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use funniest_domains::inbound::http::routes;
///
/// let app = App::new().service(web::scope("/domains").configure(routes));
/// ```
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config())
        .app_data(form_config())
        .service(login::login_page)
        .service(login::login)
        .service(login::logout)
        .service(submissions::submit_page)
        .service(submissions::submit_domain)
        .service(submissions::submission_success)
        .service(domains::list_domains)
        .service(domains::mutate_like);
}
