//! Application settings and the HTTP server configuration built from them.

use std::io;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use funniest_domains::domain::ListingPolicy;
use funniest_domains::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use pagination::{OffsetStrategy, PageSize, PaginationError};
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings loaded from `FUNNIEST_*` environment variables, CLI flags and
/// configuration files.
///
/// The boolean switches have no CLI flags; set them through the environment
/// or a configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FUNNIEST")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps everything in memory.
    pub database_url: Option<String>,
    /// Domains per page.
    pub page_size: Option<u32>,
    /// Send anonymous visitors to the login form.
    #[ortho_config(default = false, skip_cli)]
    pub require_login: bool,
    /// Split the listing into pages.
    #[ortho_config(default = true, skip_cli)]
    pub paginated: bool,
    /// Use the `size * page - 1` offset formula.
    #[ortho_config(default = false, skip_cli)]
    pub legacy_offset: bool,
    /// Insert the sample domains into an empty store.
    #[ortho_config(default = true, skip_cli)]
    pub seed_sample_domains: bool,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] for an unparseable address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address '{raw}': {err}"),
            )
        })
    }

    /// Listing capabilities selected by these settings.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError`] when the page size is zero or too large.
    pub fn listing_policy(&self) -> Result<ListingPolicy, PaginationError> {
        let page_size = match self.page_size {
            Some(size) => PageSize::new(size)?,
            None => PageSize::default(),
        };
        Ok(ListingPolicy {
            require_login: self.require_login,
            paginated: self.paginated,
            page_size,
            offset_strategy: if self.legacy_offset {
                OffsetStrategy::Legacy
            } else {
                OffsetStrategy::Standard
            },
        })
    }

    /// Whether to seed an empty store with the sample domains.
    #[must_use]
    pub fn seed_enabled(&self) -> bool {
        self.seed_sample_domains
    }

    /// Pool configuration when a database URL is set.
    #[must_use]
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            PoolConfig::new(url).with_max_size(
                self.db_max_connections
                    .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            )
        })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) policy: ListingPolicy,
    pub(crate) seed_sample_domains: bool,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            policy: ListingPolicy::default(),
            seed_sample_domains: true,
            db_pool: None,
        }
    }

    /// Use `policy` for the listing.
    #[must_use]
    pub fn with_policy(mut self, policy: ListingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Toggle seeding of the sample domains.
    #[must_use]
    pub fn with_seed_sample_domains(mut self, seed: bool) -> Self {
        self.seed_sample_domains = seed;
        self
    }

    /// Attach a database connection pool. Without one the server runs on
    /// the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
