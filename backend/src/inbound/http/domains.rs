//! Listing and like/unlike handlers.
//!
//! ```text
//! GET  /domains?page=2
//! POST /domains?page=2   _action=like&domain-id=<uuid>
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use pagination::{PageLinks, PageRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{DomainId, DomainsPage, Error, LikeAction, PendingMutation, RankedDomain};
use crate::inbound::http::ApiResult;
use crate::inbound::http::redirect::{domains_with_query, login_location, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message for unparseable mutation forms.
pub const INVALID_BODY_MESSAGE: &str = "Invalid body";

/// One listed domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainView {
    pub id: DomainId,
    pub name: String,
    pub likes: u32,
    pub liked_by_user: bool,
}

impl From<RankedDomain> for DomainView {
    fn from(ranked: RankedDomain) -> Self {
        Self {
            id: ranked.record.id,
            name: ranked.record.name.to_string(),
            likes: ranked.record.likes,
            liked_by_user: ranked.liked_by_viewer,
        }
    }
}

/// Loader data for `GET /domains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainsPageView {
    pub domains: Vec<DomainView>,
    pub page: u32,
    pub pages: u32,
    pub is_logged_in: bool,
    pub links: PageLinks,
}

impl From<DomainsPage> for DomainsPageView {
    fn from(page: DomainsPage) -> Self {
        Self {
            links: PageLinks::new(page.page, page.pages),
            domains: page.domains.into_iter().map(DomainView::from).collect(),
            page: page.page.get(),
            pages: page.pages,
            is_logged_in: page.is_logged_in,
        }
    }
}

/// Urlencoded body of `POST /domains`.
#[derive(Debug, Deserialize)]
pub struct LikeForm {
    #[serde(rename = "_action")]
    pub action: String,
    #[serde(rename = "domain-id")]
    pub domain_id: String,
}

impl LikeForm {
    fn into_mutation(self) -> Result<PendingMutation, Error> {
        let action: LikeAction = self
            .action
            .parse()
            .map_err(|_| Error::invalid_request(INVALID_BODY_MESSAGE))?;
        let target: DomainId = self
            .domain_id
            .parse()
            .map_err(|_| Error::invalid_request(INVALID_BODY_MESSAGE))?;
        Ok(PendingMutation::new(action, target))
    }
}

/// Ranked listing for the current viewer.
///
/// Redirects anonymous visitors to the login form when the listing
/// requires a session.
#[get("")]
pub async fn list_domains(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageRequest>,
) -> ApiResult<HttpResponse> {
    let request = query.into_inner();
    let viewer = session.user_id()?;
    if viewer.is_none() && state.domains.policy().require_login {
        return Ok(see_other(&login_location(request.page)));
    }

    let page = state
        .domains
        .page(viewer, request.page_or_first())
        .await?;
    Ok(HttpResponse::Ok().json(DomainsPageView::from(page)))
}

/// Commit a like or unlike, then return to the same page.
#[post("")]
pub async fn mutate_like(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageRequest>,
    form: web::Form<LikeForm>,
) -> ApiResult<HttpResponse> {
    let Some(user) = session.user_id()? else {
        return Ok(see_other(&login_location(query.page)));
    };
    let mutation = form.into_inner().into_mutation()?;
    debug!(action = %mutation.action, target = %mutation.target, "applying like mutation");
    state.likes.apply(user, mutation).await?;
    Ok(see_other(&domains_with_query(req.query_string())))
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{MockDomainsQuery, MockLikesCommand};
    use crate::domain::{DomainName, DomainRecord, ListingPolicy, UserId};
    use crate::inbound::http::test_utils::{TestPorts, sign_in, test_app};

    fn record(name: &str, likes: u32) -> DomainRecord {
        DomainRecord {
            id: DomainId::random(),
            name: DomainName::parse(name).expect("valid name"),
            likes,
            updated_at: Utc::now(),
        }
    }

    fn location(res: &actix_web::dev::ServiceResponse) -> &str {
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .expect("location header")
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_listing_returns_loader_data() {
        let mut domains = MockDomainsQuery::new();
        domains.expect_policy().return_const(ListingPolicy::default());
        domains
            .expect_page()
            .withf(|viewer, page| viewer.is_none() && page.get() == 2)
            .times(1)
            .returning(|_, page| {
                Ok(DomainsPage {
                    domains: vec![RankedDomain {
                        record: record("Whorepresents.com", 4),
                        liked_by_viewer: false,
                    }],
                    page,
                    pages: 3,
                    is_logged_in: false,
                })
            });
        let app = test::init_service(test_app(TestPorts::default().with_domains(domains))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/domains?page=2").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["page"], 2);
        assert_eq!(body["pages"], 3);
        assert_eq!(body["isLoggedIn"], false);
        assert_eq!(body["domains"][0]["name"], "Whorepresents.com");
        assert_eq!(body["domains"][0]["likes"], 4);
        assert_eq!(body["domains"][0]["likedByUser"], false);
        assert_eq!(body["links"]["prev"], "?page=1");
        assert_eq!(body["links"]["next"], "?page=3");
    }

    #[rstest]
    #[case("/domains?page=0")]
    #[case("/domains?page=abc")]
    #[actix_web::test]
    async fn invalid_pages_are_bad_requests(#[case] uri: &str) {
        let app = test::init_service(test_app(TestPorts::default())).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[rstest]
    #[actix_web::test]
    async fn login_required_listing_redirects_anonymous_visitors() {
        let mut domains = MockDomainsQuery::new();
        domains.expect_policy().return_const(ListingPolicy {
            require_login: true,
            ..ListingPolicy::default()
        });
        domains.expect_page().never();
        let app = test::init_service(test_app(TestPorts::default().with_domains(domains))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/domains?page=4").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/domains/login?page=4");
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_mutations_redirect_to_login() {
        let mut likes = MockLikesCommand::new();
        likes.expect_apply().never();
        let app = test::init_service(test_app(TestPorts::default().with_likes(likes))).await;
        let id = DomainId::random().to_string();

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/domains?page=2")
                .set_form([("_action", "like"), ("domain-id", id.as_str())])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/domains/login?page=2");
    }

    #[rstest]
    #[actix_web::test]
    async fn committed_mutations_return_to_the_same_page() {
        let user = UserId::random();
        let target = record("Itscrap.com", 1);
        let target_id = target.id;
        let mut likes = MockLikesCommand::new();
        likes
            .expect_apply()
            .withf(move |who, mutation| {
                *who == user
                    && mutation.action == LikeAction::Like
                    && mutation.target == target_id
            })
            .times(1)
            .returning(move |_, _| Ok(target.clone()));
        let app = test::init_service(test_app(TestPorts::default().with_likes(likes))).await;
        let cookie = sign_in(&app, user).await;
        let id = target_id.to_string();

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/domains?page=3")
                .cookie(cookie)
                .set_form([("_action", "like"), ("domain-id", id.as_str())])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/domains?page=3");
    }

    #[rstest]
    #[actix_web::test]
    async fn conflicts_are_form_errors() {
        let mut likes = MockLikesCommand::new();
        likes
            .expect_apply()
            .returning(|_, _| Err(Error::conflict("You've already liked this domain")));
        let app = test::init_service(test_app(TestPorts::default().with_likes(likes))).await;
        let cookie = sign_in(&app, UserId::random()).await;
        let id = DomainId::random().to_string();

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/domains")
                .cookie(cookie)
                .set_form([("_action", "like"), ("domain-id", id.as_str())])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "conflict");
        assert_eq!(body["message"], "You've already liked this domain");
    }

    #[rstest]
    #[case::unknown_action(&[("_action", "love"), ("domain-id", "00000000-0000-0000-0000-000000000000")])]
    #[case::bad_id(&[("_action", "like"), ("domain-id", "seven")])]
    #[case::missing_id(&[("_action", "unlike")])]
    #[actix_web::test]
    async fn malformed_bodies_are_rejected(#[case] fields: &[(&str, &str)]) {
        let mut likes = MockLikesCommand::new();
        likes.expect_apply().never();
        let app = test::init_service(test_app(TestPorts::default().with_likes(likes))).await;
        let cookie = sign_in(&app, UserId::random()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/domains?page=1")
                .cookie(cookie)
                .set_form(fields)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], INVALID_BODY_MESSAGE);
    }
}
