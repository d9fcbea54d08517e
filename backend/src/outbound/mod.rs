//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: a mutex-guarded store used when no database is configured.
//! - **security**: Argon2id password hashing.
//!
//! Adapters translate between domain types and infrastructure
//! representations and hold no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
