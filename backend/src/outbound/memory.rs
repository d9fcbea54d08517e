//! In-process store implementing every repository port.
//!
//! Used when no database URL is configured and by the behaviour suites.
//! State lives behind one mutex so a like and its counter change commit
//! together, mirroring the transaction the Diesel adapter runs.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageWindow;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, DomainRepository, DomainRepositoryError,
    StoredAccount, SubmissionRepository, SubmissionRepositoryError,
};
use crate::domain::{
    DomainId, DomainName, DomainRecord, DomainSubmission, LikeAction, RankedDomain, UserId,
    Username,
};

#[derive(Default)]
struct State {
    domains: Vec<DomainRecord>,
    likes: HashSet<(UserId, DomainId)>,
    accounts: HashMap<String, StoredAccount>,
    submissions: Vec<DomainSubmission>,
}

/// Mutex-guarded store for domains, likes, accounts and submissions.
pub struct InMemoryStore {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Create an empty store stamping changes with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            clock,
        }
    }

    /// Insert `record` as-is. Intended for fixtures that need specific like
    /// counts or timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`DomainRepositoryError::Query`] when the store lock is
    /// poisoned.
    pub fn insert_domain(&self, record: DomainRecord) -> Result<(), DomainRepositoryError> {
        let mut state = self.lock().map_err(DomainRepositoryError::query)?;
        state.domains.push(record);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

fn rank(domains: &mut [DomainRecord]) {
    domains.sort_by_key(|record| (Reverse(record.likes), Reverse(record.updated_at), record.id));
}

#[async_trait]
impl DomainRepository for InMemoryStore {
    async fn list_ranked(
        &self,
        window: PageWindow,
        viewer: Option<UserId>,
    ) -> Result<Vec<RankedDomain>, DomainRepositoryError> {
        let mut state = self.lock().map_err(DomainRepositoryError::query)?;
        rank(&mut state.domains);
        let offset = usize::try_from(window.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit()).unwrap_or(usize::MAX);

        Ok(state
            .domains
            .iter()
            .skip(offset)
            .take(limit)
            .map(|record| RankedDomain {
                liked_by_viewer: viewer
                    .is_some_and(|user| state.likes.contains(&(user, record.id))),
                record: record.clone(),
            })
            .collect())
    }

    async fn count(&self) -> Result<u64, DomainRepositoryError> {
        let state = self.lock().map_err(DomainRepositoryError::query)?;
        Ok(state.domains.len() as u64)
    }

    async fn find_like(
        &self,
        user: UserId,
        domain: DomainId,
    ) -> Result<bool, DomainRepositoryError> {
        let state = self.lock().map_err(DomainRepositoryError::query)?;
        Ok(state.likes.contains(&(user, domain)))
    }

    async fn apply_like(
        &self,
        user: UserId,
        domain: DomainId,
        action: LikeAction,
    ) -> Result<DomainRecord, DomainRepositoryError> {
        let now = self.clock.utc();
        let mut guard = self.lock().map_err(DomainRepositoryError::query)?;
        let state = &mut *guard;
        let record = state
            .domains
            .iter_mut()
            .find(|record| record.id == domain)
            .ok_or_else(|| DomainRepositoryError::not_found(domain))?;

        match action {
            LikeAction::Like => {
                if !state.likes.insert((user, domain)) {
                    return Err(DomainRepositoryError::already_liked());
                }
                record.likes = record.likes.saturating_add(1);
            }
            LikeAction::Unlike => {
                if !state.likes.remove(&(user, domain)) {
                    return Err(DomainRepositoryError::not_liked());
                }
                record.likes = record.likes.saturating_sub(1);
            }
        }
        record.updated_at = now;
        Ok(record.clone())
    }

    async fn seed_if_empty(&self, names: &[DomainName]) -> Result<usize, DomainRepositoryError> {
        let now = self.clock.utc();
        let mut state = self.lock().map_err(DomainRepositoryError::query)?;
        if !state.domains.is_empty() {
            return Ok(0);
        }
        state.domains.extend(names.iter().map(|name| DomainRecord {
            id: DomainId::random(),
            name: name.clone(),
            likes: 0,
            updated_at: now,
        }));
        Ok(names.len())
    }
}

#[async_trait]
impl SubmissionRepository for InMemoryStore {
    async fn create(&self, submission: &DomainSubmission) -> Result<(), SubmissionRepositoryError> {
        let mut state = self.lock().map_err(SubmissionRepositoryError::query)?;
        let duplicate = state.submissions.iter().any(|existing| {
            existing.submitted_by == submission.submitted_by
                && existing.domain == submission.domain
        });
        if duplicate {
            return Err(SubmissionRepositoryError::duplicate(
                submission.domain.as_str(),
            ));
        }
        state.submissions.push(submission.clone());
        Ok(())
    }

    async fn find(
        &self,
        user: UserId,
        domain: &DomainName,
    ) -> Result<Option<DomainSubmission>, SubmissionRepositoryError> {
        let state = self.lock().map_err(SubmissionRepositoryError::query)?;
        Ok(state
            .submissions
            .iter()
            .find(|existing| existing.submitted_by == user && &existing.domain == domain)
            .cloned())
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        let state = self.lock().map_err(AccountRepositoryError::query)?;
        Ok(state.accounts.get(username.as_str()).cloned())
    }

    async fn create(&self, account: &StoredAccount) -> Result<(), AccountRepositoryError> {
        let mut state = self.lock().map_err(AccountRepositoryError::query)?;
        let key = account.user.username().as_str().to_owned();
        if state.accounts.contains_key(&key) {
            return Err(AccountRepositoryError::username_taken(key));
        }
        state.accounts.insert(key, account.clone());
        Ok(())
    }
}
