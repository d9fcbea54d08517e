//! Domain submission handlers.
//!
//! ```text
//! GET  /domains/submit
//! POST /domains/submit            domain=Expertsexchange.com
//! GET  /domains/submit/success?domain=Expertsexchange.com
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{DomainName, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::redirect::{LOGIN_PATH, see_other, submit_success_location};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message for a submission form without a `domain` field.
pub const INCOMPLETE_FORM_MESSAGE: &str = "Form not submitted correctly.";
/// Message when the confirmation page has nothing to confirm.
pub const SUBMISSION_NOT_FOUND_MESSAGE: &str = "Domain submission not found.";

/// Urlencoded body of `POST /domains/submit`.
#[derive(Debug, Default, Deserialize)]
pub struct SubmissionForm {
    pub domain: Option<String>,
}

/// Query string of the confirmation page.
#[derive(Debug, Default, Deserialize)]
pub struct SuccessQuery {
    pub domain: Option<String>,
}

/// Loader data for the submission form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPageView {
    pub is_logged_in: bool,
}

/// Loader data for the confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionView {
    pub domain: String,
}

/// The submission form; visitors must be signed in.
#[get("/submit")]
pub async fn submit_page(session: SessionContext) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_none() {
        return Ok(see_other(LOGIN_PATH));
    }
    Ok(HttpResponse::Ok().json(SubmitPageView { is_logged_in: true }))
}

/// Queue a domain for moderation and show the confirmation page.
#[post("/submit")]
pub async fn submit_domain(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<SubmissionForm>,
) -> ApiResult<HttpResponse> {
    let Some(user) = session.user_id()? else {
        return Ok(see_other(LOGIN_PATH));
    };
    let Some(raw) = form.into_inner().domain.filter(|raw| !raw.is_empty()) else {
        return Err(Error::invalid_request(INCOMPLETE_FORM_MESSAGE));
    };
    let submission = state.submissions.submit(user, &raw).await?;
    Ok(see_other(&submit_success_location(
        submission.domain.as_str(),
    )))
}

/// Confirm a submission made by the current user.
#[get("/submit/success")]
pub async fn submission_success(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SuccessQuery>,
) -> ApiResult<HttpResponse> {
    let Some(user) = session.user_id()? else {
        return Ok(see_other(LOGIN_PATH));
    };
    let not_found = || Error::not_found(SUBMISSION_NOT_FOUND_MESSAGE);
    let raw = query.into_inner().domain.ok_or_else(not_found)?;
    let domain = DomainName::parse(&raw).map_err(|err| {
        debug!(error = %err, "confirmation requested for an invalid domain");
        not_found()
    })?;
    let submission = state
        .submissions_query
        .find(user, &domain)
        .await?
        .ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(SubmissionView {
        domain: submission.domain.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{MockSubmissionCommand, MockSubmissionQuery};
    use crate::domain::{DomainSubmission, SubmissionId, UserId};
    use crate::inbound::http::test_utils::{TestPorts, sign_in, test_app};

    fn submission(domain: &str, user: UserId) -> DomainSubmission {
        DomainSubmission {
            id: SubmissionId::random(),
            domain: DomainName::parse(domain).expect("valid domain"),
            submitted_by: user,
            created_at: Utc::now(),
        }
    }

    fn location(res: &actix_web::dev::ServiceResponse) -> &str {
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .expect("location header")
    }

    #[rstest]
    #[case::form(test::TestRequest::get().uri("/domains/submit"))]
    #[case::submit(test::TestRequest::post().uri("/domains/submit").set_form([("domain", "a.com")]))]
    #[case::success(test::TestRequest::get().uri("/domains/submit/success?domain=a.com"))]
    #[actix_web::test]
    async fn anonymous_visitors_are_sent_to_login(#[case] req: test::TestRequest) {
        let app = test::init_service(test_app(TestPorts::default())).await;

        let res = test::call_service(&app, req.to_request()).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/domains/login");
    }

    #[rstest]
    #[actix_web::test]
    async fn signed_in_visitors_see_the_form() {
        let app = test::init_service(test_app(TestPorts::default())).await;
        let cookie = sign_in(&app, UserId::random()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/domains/submit")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn accepted_submissions_redirect_to_the_encoded_confirmation() {
        let user = UserId::random();
        let mut submissions = MockSubmissionCommand::new();
        submissions
            .expect_submit()
            .withf(move |who, raw| *who == user && raw == "Experts-exchange.com")
            .times(1)
            .returning(|who, raw| Ok(submission(raw, who)));
        let app =
            test::init_service(test_app(TestPorts::default().with_submissions(submissions))).await;
        let cookie = sign_in(&app, user).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/domains/submit")
                .cookie(cookie)
                .set_form([("domain", "Experts-exchange.com")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&res),
            "/domains/submit/success?domain=Experts-exchange.com"
        );
    }

    #[rstest]
    #[case::missing(&[])]
    #[case::empty(&[("domain", "")])]
    #[actix_web::test]
    async fn incomplete_forms_are_rejected(#[case] fields: &[(&str, &str)]) {
        let mut submissions = MockSubmissionCommand::new();
        submissions.expect_submit().never();
        let app =
            test::init_service(test_app(TestPorts::default().with_submissions(submissions))).await;
        let cookie = sign_in(&app, UserId::random()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/domains/submit")
                .cookie(cookie)
                .set_form(fields)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], INCOMPLETE_FORM_MESSAGE);
    }

    #[rstest]
    #[actix_web::test]
    async fn validation_failures_carry_field_errors() {
        let message = "Domains must have at least one [.]";
        let mut submissions = MockSubmissionCommand::new();
        submissions.expect_submit().returning(move |_, raw| {
            Err(Error::invalid_request(message).with_details(json!({
                "fieldErrors": { "domain": message },
                "fields": { "domain": raw },
            })))
        });
        let app =
            test::init_service(test_app(TestPorts::default().with_submissions(submissions))).await;
        let cookie = sign_in(&app, UserId::random()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/domains/submit")
                .cookie(cookie)
                .set_form([("domain", "localhost")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["fieldErrors"]["domain"], message);
        assert_eq!(body["details"]["fields"]["domain"], "localhost");
    }

    #[rstest]
    #[actix_web::test]
    async fn confirmation_returns_the_submitted_domain() {
        let user = UserId::random();
        let mut query = MockSubmissionQuery::new();
        query
            .expect_find()
            .withf(move |who, domain| *who == user && domain.as_str() == "Experts-exchange.com")
            .times(1)
            .returning(|who, domain| Ok(Some(submission(domain.as_str(), who))));
        let app =
            test::init_service(test_app(TestPorts::default().with_submissions_query(query))).await;
        let cookie = sign_in(&app, user).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/domains/submit/success?domain=Experts-exchange.com")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["domain"], "Experts-exchange.com");
    }

    #[rstest]
    #[case::no_parameter("/domains/submit/success", false)]
    #[case::invalid_domain("/domains/submit/success?domain=nodots", false)]
    #[case::not_submitted("/domains/submit/success?domain=a.com", true)]
    #[actix_web::test]
    async fn missing_confirmations_are_not_found(#[case] uri: &str, #[case] queried: bool) {
        let mut query = MockSubmissionQuery::new();
        query
            .expect_find()
            .times(usize::from(queried))
            .returning(|_, _| Ok(None));
        let app =
            test::init_service(test_app(TestPorts::default().with_submissions_query(query))).await;
        let cookie = sign_in(&app, UserId::random()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], SUBMISSION_NOT_FOUND_MESSAGE);
    }
}
