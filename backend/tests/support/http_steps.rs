//! Steps shared by the HTTP behaviour suites.

use actix_web::http::Method;
use rstest_bdd_macros::{given, then, when};
use serde_json::Value;
use url::form_urlencoded;

use crate::server_world::{SharedWorld, WorldFixture, send};

const PASSWORD: &str = "hunter22";

fn unquote(raw: &str) -> &str {
    raw.trim().trim_matches('"')
}

fn like(world: &SharedWorld, action: &str, name: &str, path: &str) {
    let id = world.borrow().domain_id(name).to_string();
    send(
        world,
        Method::POST,
        path,
        Some(&[("_action", action), ("domain-id", id.as_str())]),
    );
}

fn submit_login(world: &SharedWorld, kind: &str, username: &str, password: &str) {
    send(
        world,
        Method::POST,
        "/domains/login",
        Some(&[("type", kind), ("username", username), ("password", password)]),
    );
}

#[given("the domain {name} has {likes} likes")]
fn the_domain_has_likes(world: &WorldFixture, name: String, likes: u32) {
    world.world().borrow_mut().insert_domain(&name, likes);
}

#[given("a page size of {size}")]
fn a_page_size_of(world: &WorldFixture, size: u32) {
    world.world().borrow_mut().policy.page_size =
        pagination::PageSize::new(size).expect("valid page size");
}

#[given("the listing requires login")]
fn the_listing_requires_login(world: &WorldFixture) {
    world.world().borrow_mut().policy.require_login = true;
}

#[given("the listing is not paginated")]
fn the_listing_is_not_paginated(world: &WorldFixture) {
    world.world().borrow_mut().policy.paginated = false;
}

#[given("a visitor signed in as {username}")]
fn a_visitor_signed_in_as(world: &WorldFixture, username: String) {
    let world = world.world();
    submit_login(&world, "register", &username, PASSWORD);
    assert_eq!(world.borrow().last().status, 303, "registration should succeed");
}

#[given("an account {username} exists")]
fn an_account_exists(world: &WorldFixture, username: String) {
    let world = world.world();
    submit_login(&world, "register", &username, PASSWORD);
    assert_eq!(world.borrow().last().status, 303, "registration should succeed");
    send(&world, Method::POST, "/domains/logout", None);
}

#[when("the visitor requests {path}")]
fn the_visitor_requests(world: &WorldFixture, path: String) {
    send(&world.world(), Method::GET, &path, None);
}

#[when("the visitor likes {name} on {path}")]
fn the_visitor_likes(world: &WorldFixture, name: String, path: String) {
    like(&world.world(), "like", &name, &path);
}

#[when("the visitor unlikes {name} on {path}")]
fn the_visitor_unlikes(world: &WorldFixture, name: String, path: String) {
    like(&world.world(), "unlike", &name, &path);
}

#[when("the visitor signs out")]
fn the_visitor_signs_out(world: &WorldFixture) {
    send(&world.world(), Method::POST, "/domains/logout", None);
}

#[when("the visitor logs in as {username} with password {password}")]
fn the_visitor_logs_in(world: &WorldFixture, username: String, password: String) {
    submit_login(&world.world(), "login", &username, &password);
}

#[when("the visitor registers as {username} with password {password}")]
fn the_visitor_registers(world: &WorldFixture, username: String, password: String) {
    submit_login(&world.world(), "register", &username, &password);
}

#[when("the visitor suggests the domain {domain}")]
fn the_visitor_suggests(world: &WorldFixture, domain: String) {
    let domain = unquote(&domain).to_owned();
    send(
        &world.world(),
        Method::POST,
        "/domains/submit",
        Some(&[("domain", domain.as_str())]),
    );
}

#[when("the visitor checks the confirmation for {domain}")]
fn the_visitor_checks_the_confirmation(world: &WorldFixture, domain: String) {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("domain", unquote(&domain))
        .finish();
    send(
        &world.world(),
        Method::GET,
        &format!("/domains/submit/success?{query}"),
        None,
    );
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    assert_eq!(world.world().borrow().last().status, status);
}

#[then("the visitor is redirected to {location}")]
fn the_visitor_is_redirected_to(world: &WorldFixture, location: String) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.last().status, 303);
    assert_eq!(ctx.last().location.as_deref(), Some(unquote(&location)));
}

#[then("the response carries a trace id")]
fn the_response_carries_a_trace_id(world: &WorldFixture) {
    let world = world.world();
    let ctx = world.borrow();
    let trace_id = ctx.last().trace_id.as_deref().expect("trace id header");
    if let Some(body_trace) = ctx.last().body.as_ref().and_then(|body| body.get("traceId")) {
        assert_eq!(body_trace.as_str(), Some(trace_id));
    }
}

#[then("the error message is {message}")]
fn the_error_message_is(world: &WorldFixture, message: String) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(
        ctx.last().json().get("message").and_then(Value::as_str),
        Some(unquote(&message))
    );
}

#[then("the {field} field error is {message}")]
fn the_field_error_is(world: &WorldFixture, field: String, message: String) {
    let world = world.world();
    let ctx = world.borrow();
    let errors = &ctx.last().json()["details"]["fieldErrors"];
    assert_eq!(errors[field.as_str()].as_str(), Some(unquote(&message)));
}

#[then("the listing is page {page} of {pages}")]
fn the_listing_is_page_of(world: &WorldFixture, page: u32, pages: u32) {
    let world = world.world();
    let ctx = world.borrow();
    let body = ctx.last().json();
    assert_eq!(body["page"].as_u64(), Some(u64::from(page)));
    assert_eq!(body["pages"].as_u64(), Some(u64::from(pages)));
}

#[then("the listing shows {names}")]
fn the_listing_shows(world: &WorldFixture, names: String) {
    let world = world.world();
    let ctx = world.borrow();
    let shown: Vec<&str> = ctx.last().json()["domains"]
        .as_array()
        .expect("domains array")
        .iter()
        .filter_map(|domain| domain["name"].as_str())
        .collect();
    let expected: Vec<&str> = names.split(',').map(unquote).collect();
    assert_eq!(shown, expected);
}

#[then("the listing is empty")]
fn the_listing_is_empty(world: &WorldFixture) {
    let world = world.world();
    let ctx = world.borrow();
    let domains = ctx.last().json()["domains"].as_array().map(Vec::len);
    assert_eq!(domains, Some(0));
}

#[then("{name} has {likes} likes and is liked by the visitor: {liked}")]
fn domain_has_likes(world: &WorldFixture, name: String, likes: u32, liked: bool) {
    let world = world.world();
    let ctx = world.borrow();
    let domain = ctx.last().json()["domains"]
        .as_array()
        .expect("domains array")
        .iter()
        .find(|domain| domain["name"].as_str() == Some(name.as_str()))
        .cloned()
        .expect("domain listed");
    assert_eq!(domain["likes"].as_u64(), Some(u64::from(likes)));
    assert_eq!(domain["likedByUser"].as_bool(), Some(liked));
}

#[then("the visitor is signed in")]
fn the_visitor_is_signed_in(world: &WorldFixture) {
    let world = world.world();
    send(&world, Method::GET, "/domains/login", None);
    assert_eq!(world.borrow().last().json()["isLoggedIn"], Value::Bool(true));
}

#[then("the visitor is anonymous")]
fn the_visitor_is_anonymous(world: &WorldFixture) {
    let world = world.world();
    send(&world, Method::GET, "/domains/login", None);
    assert_eq!(world.borrow().last().json()["isLoggedIn"], Value::Bool(false));
}
