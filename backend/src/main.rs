//! Backend entry-point: loads settings, prepares storage and serves the
//! `/domains` pages.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use funniest_domains::inbound::http::health::HealthState;
use funniest_domains::inbound::http::session_config::fingerprint::key_fingerprint;
use funniest_domains::inbound::http::session_config::{BuildMode, session_settings_from_env};
use funniest_domains::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{AppSettings, ServerConfig, create_server};

/// Apply pending migrations on a blocking thread, then open the pool.
async fn prepare_database(config: PoolConfig) -> io::Result<DbPool> {
    let url = config.database_url().to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| io::Error::other(format!("migration task failed: {err}")))?
        .map_err(|err| io::Error::other(format!("apply migrations: {err}")))?;
    info!(applied, "database migrations complete");
    DbPool::new(config)
        .await
        .map_err(|err| io::Error::other(format!("create database pool: {err}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("load settings: {err}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| io::Error::other(format!("session configuration: {err}")))?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let policy = settings
        .listing_policy()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;
    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_policy(policy)
    .with_seed_sample_domains(settings.seed_enabled());
    if let Some(pool_config) = settings.pool_config() {
        config = config.with_db_pool(prepare_database(pool_config).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    info!(
        addr = %bind_addr,
        paginated = policy.paginated,
        "listening"
    );
    server.await
}
