//! Builders wiring repositories and services into the HTTP state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use funniest_domains::domain::ports::{
    AccountRepository, DomainRepository, DomainsQuery, LikesCommand, SubmissionCommand,
    SubmissionQuery, SubmissionRepository,
};
use funniest_domains::domain::{
    AccountsService, DomainsService, ListingPolicy, SubmissionService,
};
use funniest_domains::inbound::http::state::{HttpState, HttpStatePorts};
use funniest_domains::outbound::memory::InMemoryStore;
use funniest_domains::outbound::persistence::{
    DieselAccountRepository, DieselDomainRepository, DieselSubmissionRepository,
};
use funniest_domains::outbound::security::Argon2CredentialHasher;

use super::ServerConfig;

/// Driven adapters backing one running server.
struct Repositories<D, A, S> {
    domains: Arc<D>,
    accounts: Arc<A>,
    submissions: Arc<S>,
}

/// Build services over `repos` and expose them as driving ports.
///
/// Seeds the sample domains first when `seed` is set and the store is empty.
async fn assemble<D, A, S>(
    repos: Repositories<D, A, S>,
    policy: ListingPolicy,
    seed: bool,
    clock: Arc<dyn Clock>,
) -> io::Result<HttpStatePorts>
where
    D: DomainRepository + 'static,
    A: AccountRepository + 'static,
    S: SubmissionRepository + 'static,
{
    let domains = Arc::new(DomainsService::new(repos.domains, policy));
    if seed {
        domains
            .seed_sample_domains()
            .await
            .map_err(|err| io::Error::other(format!("seed sample domains: {err}")))?;
    }
    let accounts = Arc::new(AccountsService::new(
        repos.accounts,
        Arc::new(Argon2CredentialHasher::default()),
    ));
    let submissions = Arc::new(SubmissionService::new(repos.submissions, clock));

    Ok(HttpStatePorts {
        domains: domains.clone() as Arc<dyn DomainsQuery>,
        likes: domains as Arc<dyn LikesCommand>,
        login: accounts,
        submissions: submissions.clone() as Arc<dyn SubmissionCommand>,
        submissions_query: submissions as Arc<dyn SubmissionQuery>,
    })
}

/// Build the HTTP state, backed by PostgreSQL when a pool is configured and
/// by the in-memory store otherwise.
pub(super) async fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL persistence");
            let repos = Repositories {
                domains: Arc::new(DieselDomainRepository::new(pool.clone())),
                accounts: Arc::new(DieselAccountRepository::new(pool.clone())),
                submissions: Arc::new(DieselSubmissionRepository::new(pool.clone())),
            };
            assemble(repos, config.policy, config.seed_sample_domains, clock).await?
        }
        None => {
            info!("no database configured; using the in-memory store");
            let store = Arc::new(InMemoryStore::new(clock.clone()));
            let repos = Repositories {
                domains: store.clone(),
                accounts: store.clone(),
                submissions: store,
            };
            assemble(repos, config.policy, config.seed_sample_domains, clock).await?
        }
    };
    Ok(web::Data::new(HttpState::new(ports)))
}
