//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite, time::Duration};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use funniest_domains::Trace;
use funniest_domains::inbound::http::health::{HealthState, live, ready};
use funniest_domains::inbound::http::routes;
use funniest_domains::inbound::http::state::HttpState;

/// Name of the session cookie.
const SESSION_COOKIE_NAME: &str = "FD_session";
/// Days a session survives without a new login.
const SESSION_TTL_DAYS: i64 = 30;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(Duration::days(SESSION_TTL_DAYS)))
        .build()
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let domains = web::scope("/domains")
        .wrap(session_middleware(key, cookie_secure, same_site))
        .configure(routes);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(domains)
        .service(ready)
        .service(live)
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn termination_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Wait for `signal`, then fail liveness so the server drains.
async fn fail_liveness_on<F>(health_state: web::Data<HealthState>, signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(error) = signal.await {
        warn!(%error, "cannot listen for shutdown signals");
        std::future::pending::<()>().await;
    }
    health_state.mark_unhealthy();
    info!("shutdown requested");
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// Builds the services (seeding the store when enabled), binds the socket
/// and marks the server ready. A termination signal fails liveness and
/// starts a graceful shutdown.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding, binding the socket or
/// starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config).await?;
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .shutdown_signal(fail_liveness_on(
        health_state.clone(),
        termination_signal(),
    ))
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
