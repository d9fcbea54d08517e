//! Like-ranked listing of comically named domains.
//!
//! The crate is split hexagonally:
//! - [`domain`]: validated types, the ranking reconciler, services and ports.
//! - [`inbound`]: actix-web handlers, sessions and request validation.
//! - [`outbound`]: Diesel persistence, the in-memory store and password
//!   hashing.
//! - [`middleware`]: per-request trace ids.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use domain::TraceId;
pub use middleware::Trace;
