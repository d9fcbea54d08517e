//! Real HTTP server over the in-memory store, shared by the behaviour suites.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The server starts lazily on the first
//! request so `Given` steps can still adjust the listing policy, and the
//! `WorldFixture` stops it even if a test panics.

use std::cell::RefCell;
use std::collections::HashMap;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use argon2::Params;
use awc::Client;
use chrono::{Duration, Utc};
use mockable::{Clock, DefaultClock};
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use funniest_domains::Trace;
use funniest_domains::domain::ports::{
    DomainsQuery, LikesCommand, SubmissionCommand, SubmissionQuery,
};
use funniest_domains::domain::{
    AccountsService, DomainId, DomainName, DomainRecord, DomainsService, ListingPolicy,
    SubmissionService, TRACE_ID_HEADER,
};
use funniest_domains::inbound::http::routes;
use funniest_domains::inbound::http::state::{HttpState, HttpStatePorts};
use funniest_domains::outbound::memory::InMemoryStore;
use funniest_domains::outbound::security::Argon2CredentialHasher;

/// What the last request returned.
#[derive(Debug, Default)]
pub(crate) struct Recorded {
    pub(crate) status: u16,
    pub(crate) location: Option<String>,
    pub(crate) trace_id: Option<String>,
    pub(crate) set_cookie: Option<String>,
    pub(crate) body: Option<Value>,
}

impl Recorded {
    /// JSON body, panicking when the response had none.
    pub(crate) fn json(&self) -> &Value {
        self.body.as_ref().expect("JSON response body")
    }
}

pub(crate) struct ServerWorld {
    runtime: Runtime,
    local: LocalSet,
    server: Option<(String, ServerHandle)>,
    pub(crate) store: Arc<InMemoryStore>,
    pub(crate) policy: ListingPolicy,
    pub(crate) domain_ids: HashMap<String, DomainId>,
    inserted: i64,
    pub(crate) cookie: Option<String>,
    pub(crate) last: Option<Recorded>,
}

impl ServerWorld {
    /// Insert `name` with `likes`; later inserts are newer.
    pub(crate) fn insert_domain(&mut self, name: &str, likes: u32) {
        self.inserted += 1;
        let record = DomainRecord {
            id: DomainId::random(),
            name: DomainName::parse(name).expect("valid fixture domain"),
            likes,
            updated_at: Utc::now() - Duration::hours(1) + Duration::seconds(self.inserted),
        };
        self.domain_ids.insert(name.to_owned(), record.id);
        self.store
            .insert_domain(record)
            .expect("in-memory insert");
    }

    pub(crate) fn domain_id(&self, name: &str) -> DomainId {
        *self.domain_ids.get(name).expect("domain inserted by a Given step")
    }

    pub(crate) fn last(&self) -> &Recorded {
        self.last.as_ref().expect("a request should have been sent")
    }
}

pub(crate) type SharedWorld = Rc<RefCell<ServerWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        if let Some((_, server)) = ctx.server.clone() {
            ctx.local.block_on(&ctx.runtime, async move {
                server.stop(true).await;
            });
        }
    }
}

/// Argon2 with the smallest parameters so registration stays fast.
fn cheap_hasher() -> Argon2CredentialHasher {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("argon2 test params");
    Argon2CredentialHasher::with_params(params)
}

fn http_state(store: &Arc<InMemoryStore>, policy: ListingPolicy) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let domains = Arc::new(DomainsService::new(store.clone(), policy));
    let submissions = Arc::new(SubmissionService::new(store.clone(), clock));
    HttpState::new(HttpStatePorts {
        domains: domains.clone() as Arc<dyn DomainsQuery>,
        likes: domains as Arc<dyn LikesCommand>,
        login: Arc::new(AccountsService::new(store.clone(), Arc::new(cheap_hasher()))),
        submissions: submissions.clone() as Arc<dyn SubmissionCommand>,
        submissions_query: submissions as Arc<dyn SubmissionQuery>,
    })
}

async fn spawn_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("FD_session".to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(false)
            .build();
        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .service(web::scope("/domains").wrap(session).configure(routes))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

fn base_url(world: &SharedWorld) -> String {
    let mut ctx = world.borrow_mut();
    if let Some((url, _)) = &ctx.server {
        return url.clone();
    }
    let state = http_state(&ctx.store, ctx.policy);
    let started = ctx
        .local
        .block_on(&ctx.runtime, spawn_server(state))
        .expect("start test server");
    let url = started.0.clone();
    ctx.server = Some(started);
    url
}

/// Send a request with the stored session cookie, recording the response.
///
/// A `Set-Cookie` on the response replaces the stored cookie.
pub(crate) fn send(world: &SharedWorld, method: Method, path: &str, form: Option<&[(&str, &str)]>) {
    let url = format!("{}{path}", base_url(world));
    let cookie = world.borrow().cookie.clone();
    let form: Option<Vec<(String, String)>> = form.map(|pairs| {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    });

    let recorded = {
        let ctx = world.borrow();
        ctx.local.block_on(&ctx.runtime, async move {
            let client = Client::builder().disable_redirects().finish();
            let mut request = client.request(method, url);
            if let Some(cookie) = cookie {
                request = request.insert_header((header::COOKIE, cookie));
            }
            let mut response = match form {
                Some(form) => request.send_form(&form).await,
                None => request.send().await,
            }
            .expect("request should complete");
            let text = |name: header::HeaderName| {
                response
                    .headers()
                    .get(name)
                    .and_then(|value| value.to_str().ok())
                    .map(ToOwned::to_owned)
            };
            let location = text(header::LOCATION);
            let trace_id = text(header::HeaderName::from_static(TRACE_ID_HEADER));
            let set_cookie = text(header::SET_COOKIE);
            let status = response.status().as_u16();
            let body = response.body().await.expect("response body");
            Recorded {
                status,
                location,
                trace_id,
                set_cookie,
                body: serde_json::from_slice(&body).ok(),
            }
        })
    };

    let mut ctx = world.borrow_mut();
    if let Some(set_cookie) = &recorded.set_cookie {
        ctx.cookie = set_cookie.split(';').next().map(ToOwned::to_owned);
    }
    ctx.last = Some(recorded);
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    WorldFixture {
        world: Rc::new(RefCell::new(ServerWorld {
            runtime,
            local: LocalSet::new(),
            server: None,
            store: Arc::new(InMemoryStore::new(clock)),
            policy: ListingPolicy::default(),
            domain_ids: HashMap::new(),
            inserted: 0,
            cookie: None,
            last: None,
        })),
    }
}
