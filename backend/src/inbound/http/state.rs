//! Shared handler state.
//!
//! Handlers receive this through `web::Data` and see only the driving
//! ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DomainsQuery, LikesCommand, LoginService, SubmissionCommand, SubmissionQuery,
};

/// Port implementations the HTTP adapter needs.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub domains: Arc<dyn DomainsQuery>,
    pub likes: Arc<dyn LikesCommand>,
    pub login: Arc<dyn LoginService>,
    pub submissions: Arc<dyn SubmissionCommand>,
    pub submissions_query: Arc<dyn SubmissionQuery>,
}

/// Dependency bundle for handlers.
#[derive(Clone)]
pub struct HttpState {
    pub domains: Arc<dyn DomainsQuery>,
    pub likes: Arc<dyn LikesCommand>,
    pub login: Arc<dyn LoginService>,
    pub submissions: Arc<dyn SubmissionCommand>,
    pub submissions_query: Arc<dyn SubmissionQuery>,
}

impl HttpState {
    /// Assemble state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            domains,
            likes,
            login,
            submissions,
            submissions_query,
        } = ports;
        Self {
            domains,
            likes,
            login,
            submissions,
            submissions_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
