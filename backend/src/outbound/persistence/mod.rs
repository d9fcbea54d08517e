//! PostgreSQL persistence adapters using Diesel with `diesel-async` and
//! `bb8` pooling.
//!
//! Adapters only translate between row structs and domain types. Row
//! structs (`models.rs`) and the table definitions (`schema.rs`) never
//! leave this module.
//!
//! ```ignore
//! use funniest_domains::outbound::persistence::{DbPool, DieselDomainRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/funniest")).await?;
//! let domains = DieselDomainRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_domain_repository;
mod diesel_error_mapping;
mod diesel_submission_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_domain_repository::DieselDomainRepository;
pub use diesel_submission_repository::DieselSubmissionRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
