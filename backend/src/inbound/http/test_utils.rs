//! Helpers shared by handler tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::ports::{
    MockDomainsQuery, MockLikesCommand, MockLoginService, MockSubmissionCommand,
    MockSubmissionQuery,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Cookie name used by [`test_session_middleware`].
pub const SESSION_COOKIE: &str = "session";

/// Cookie session middleware with a fresh key and the `Secure` flag off so
/// plain-HTTP test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Mocked driving ports. Unconfigured mocks fail on any call.
#[derive(Default)]
pub struct TestPorts {
    domains: MockDomainsQuery,
    likes: MockLikesCommand,
    login: MockLoginService,
    submissions: MockSubmissionCommand,
    submissions_query: MockSubmissionQuery,
}

impl TestPorts {
    pub fn with_domains(mut self, domains: MockDomainsQuery) -> Self {
        self.domains = domains;
        self
    }

    pub fn with_likes(mut self, likes: MockLikesCommand) -> Self {
        self.likes = likes;
        self
    }

    pub fn with_login(mut self, login: MockLoginService) -> Self {
        self.login = login;
        self
    }

    pub fn with_submissions(mut self, submissions: MockSubmissionCommand) -> Self {
        self.submissions = submissions;
        self
    }

    pub fn with_submissions_query(mut self, query: MockSubmissionQuery) -> Self {
        self.submissions_query = query;
        self
    }

    fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            domains: Arc::new(self.domains),
            likes: Arc::new(self.likes),
            login: Arc::new(self.login),
            submissions: Arc::new(self.submissions),
            submissions_query: Arc::new(self.submissions_query),
        })
    }
}

const SIGN_IN_PATH: &str = "/test/sign-in";

async fn force_sign_in(
    session: SessionContext,
    user: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let user = UserId::new(user.into_inner()).map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user)?;
    Ok(HttpResponse::NoContent().finish())
}

/// App serving the `/domains` routes over `ports`, plus a sign-in shortcut.
pub fn test_app(
    ports: TestPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(web::Data::new(ports.into_state()))
        .service(web::scope("/domains").configure(super::routes))
        .route(
            &format!("{SIGN_IN_PATH}/{{user}}"),
            web::post().to(force_sign_in),
        )
}

/// Session cookie set on `res`.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("session cookie set")
        .into_owned()
}

/// Sign `user` in without credentials and return the session cookie.
pub async fn sign_in(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    user: UserId,
) -> Cookie<'static> {
    let req = test::TestRequest::post()
        .uri(&format!("{SIGN_IN_PATH}/{user}"))
        .to_request();
    let res = test::call_service(app, req).await;
    assert!(res.status().is_success(), "sign-in shortcut failed");
    session_cookie(&res)
}
