//! Domain types, pure ranking logic, use-case services and ports.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`DomainName`]: validated candidate domain names.
//! - [`DomainRecord`], [`RankedDomain`], [`DomainsPage`]: the ranked listing.
//! - [`reconcile`] / [`OptimisticPage`]: speculative re-ranking while a
//!   like/unlike is in flight.
//! - [`DomainsService`], [`AccountsService`], [`SubmissionService`]:
//!   implementations of the driving ports in [`ports`].

mod accounts_service;
mod auth;
mod domain_name;
mod domains;
mod domains_service;
pub mod error;
mod listing;
pub mod ports;
mod ranking;
mod submission;
mod submission_service;
mod trace_id;
mod user;

pub use self::accounts_service::{AccountsService, INVALID_LOGIN_MESSAGE};
pub use self::auth::{
    LoginCredentials, LoginFieldErrors, LoginKind, LoginValidationError, PASSWORD_MIN, Password,
};
pub use self::domain_name::{DOMAIN_NAME_MAX, DomainName, DomainNameError, LABEL_MAX};
pub use self::domains::{
    DomainId, DomainRecord, DomainsPage, LikeAction, PendingMutation, RankedDomain,
    UnknownLikeAction,
};
pub use self::domains_service::{
    ALREADY_LIKED_MESSAGE, DomainsService, NOT_LIKED_MESSAGE, SAMPLE_DOMAINS,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listing::{FULL_LIST_LIMIT, ListingPolicy};
pub use self::ranking::{OptimisticPage, ReconcileError, reconcile};
pub use self::submission::{DomainSubmission, SubmissionId};
pub use self::submission_service::SubmissionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError, Username};
