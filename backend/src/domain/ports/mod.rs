//! Domain ports: the traits adapters implement (driven) and the traits
//! inbound adapters call (driving).

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod credential_hasher;
mod domain_repository;
mod domains_query;
mod likes_command;
mod login_service;
mod submission_repository;
mod submissions;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError, StoredAccount};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use domain_repository::MockDomainRepository;
pub use domain_repository::{DomainRepository, DomainRepositoryError};
pub use domains_query::DomainsQuery;
#[cfg(test)]
pub use domains_query::MockDomainsQuery;
pub use likes_command::LikesCommand;
#[cfg(test)]
pub use likes_command::MockLikesCommand;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use submission_repository::MockSubmissionRepository;
pub use submission_repository::{SubmissionRepository, SubmissionRepositoryError};
#[cfg(test)]
pub use submissions::{MockSubmissionCommand, MockSubmissionQuery};
pub use submissions::{SubmissionCommand, SubmissionQuery};
