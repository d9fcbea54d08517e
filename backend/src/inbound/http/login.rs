//! Login, registration and logout handlers.
//!
//! ```text
//! GET  /domains/login?page=2
//! POST /domains/login?page=2   type=login&username=ada&password=hunter22
//! POST /domains/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use pagination::{PageNumber, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::redirect::{DOMAINS_PATH, domains_location, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Loader data for the login dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPageView {
    pub is_logged_in: bool,
    pub page: Option<u32>,
}

/// Urlencoded body of `POST /domains/login`.
///
/// Every field is optional so a missing one surfaces as a form error rather
/// than an extractor failure.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub page: Option<String>,
}

impl LoginForm {
    /// Page to return to; a malformed value is ignored.
    fn return_page(&self) -> Option<PageNumber> {
        self.page.as_deref().and_then(|raw| raw.parse().ok())
    }

    fn into_credentials(self) -> Result<LoginCredentials, Error> {
        let (Some(kind), Some(username), Some(password)) =
            (self.kind, self.username, self.password)
        else {
            return Err(map_login_validation_error(
                LoginValidationError::Incomplete,
                None,
            ));
        };
        LoginCredentials::try_from_parts(&kind, &username, &password).map_err(|err| {
            let fields = json!({ "loginType": kind, "username": username });
            map_login_validation_error(err, Some(fields))
        })
    }
}

/// `fields` echoes the submitted values so the form can be refilled; it
/// never carries the password.
fn map_login_validation_error(
    err: LoginValidationError,
    fields: Option<serde_json::Value>,
) -> Error {
    let message = err.to_string();
    match err {
        LoginValidationError::Incomplete => Error::invalid_request(message),
        LoginValidationError::InvalidKind => {
            Error::invalid_request(message).with_details(json!({ "fields": fields }))
        }
        LoginValidationError::Fields(errors) => Error::invalid_request(message)
            .with_details(json!({ "fieldErrors": errors, "fields": fields })),
    }
}

/// Loader data for the login dialog.
#[get("/login")]
pub async fn login_page(
    session: SessionContext,
    query: web::Query<PageRequest>,
) -> ApiResult<web::Json<LoginPageView>> {
    Ok(web::Json(LoginPageView {
        is_logged_in: session.user_id()?.is_some(),
        page: query.page.map(PageNumber::get),
    }))
}

/// Sign in or register, start a session and return to the listing.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageRequest>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let page = query.page.or_else(|| form.return_page());
    let credentials = form.into_credentials()?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user)?;
    Ok(see_other(&domains_location(page)))
}

/// End the session.
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other(DOMAINS_PATH)
}
