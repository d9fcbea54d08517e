//! Optimistic re-ranking of a rendered page while a like/unlike is in flight.
//!
//! The store orders domains by `(likes desc, updated_at desc)` and bumps
//! `updated_at` whenever a like is committed or withdrawn. The speculative
//! view therefore ranks a mutated record ahead of any record it now ties
//! with, which is exactly where the store will put it once the mutation
//! commits. Counts stay integral throughout.

use std::cmp::{Ordering, Reverse};

use super::{DomainId, LikeAction, PendingMutation, RankedDomain};

/// Rejections raised by [`OptimisticPage::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    /// Only one mutation may be in flight per page.
    #[error("a {pending} of {target} is already pending")]
    MutationPending {
        /// Action already in flight.
        pending: LikeAction,
        /// Its target.
        target: DomainId,
    },
}

/// Compute the speculative page for `mutation`.
///
/// Pure: the input is untouched and identical inputs give identical
/// output. A target missing from `page` leaves the order unchanged.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use funniest_domains::domain::{
///     reconcile, DomainId, DomainName, DomainRecord, LikeAction, PendingMutation, RankedDomain,
/// };
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid time");
/// let record = |name: &str, likes| RankedDomain {
///     record: DomainRecord {
///         id: DomainId::random(),
///         name: DomainName::parse(name).expect("valid name"),
///         likes,
///         updated_at: at,
///     },
///     liked_by_viewer: false,
/// };
/// let page = vec![record("six.com", 6), record("five.com", 5)];
/// let target = page[1].record.id;
///
/// let view = reconcile(&page, &PendingMutation::new(LikeAction::Like, target));
/// assert_eq!(view[0].record.id, target);
/// assert_eq!(view[0].record.likes, 6);
/// assert!(view[0].liked_by_viewer);
/// ```
#[must_use]
pub fn reconcile(page: &[RankedDomain], mutation: &PendingMutation) -> Vec<RankedDomain> {
    let mut view = page.to_vec();
    let Some(entry) = view
        .iter_mut()
        .find(|entry| entry.record.id == mutation.target)
    else {
        return view;
    };

    match mutation.action {
        LikeAction::Like => {
            entry.record.likes = entry.record.likes.saturating_add(1);
            entry.liked_by_viewer = true;
        }
        LikeAction::Unlike => {
            entry.record.likes = entry.record.likes.saturating_sub(1);
            entry.liked_by_viewer = false;
        }
    }

    view.sort_by(|a, b| rank_order(a, b, mutation.target));
    view
}

fn rank_order(a: &RankedDomain, b: &RankedDomain, target: DomainId) -> Ordering {
    let key = |entry: &RankedDomain| {
        (
            Reverse(entry.record.likes),
            Reverse(entry.record.id == target),
            Reverse(entry.record.updated_at),
            entry.record.id,
        )
    };
    key(a).cmp(&key(b))
}

/// A rendered page plus at most one in-flight mutation.
///
/// The speculative view is discarded, never merged, when the authoritative
/// page is re-fetched.
#[derive(Debug, Clone, Default)]
pub struct OptimisticPage {
    authoritative: Vec<RankedDomain>,
    pending: Option<(PendingMutation, Vec<RankedDomain>)>,
}

impl OptimisticPage {
    /// Wrap a page freshly loaded from the store.
    #[must_use]
    pub const fn new(authoritative: Vec<RankedDomain>) -> Self {
        Self {
            authoritative,
            pending: None,
        }
    }

    /// Start a mutation and return the speculative view.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::MutationPending`] while another mutation
    /// is in flight; the existing view is kept, not doubled.
    pub fn begin(&mut self, mutation: PendingMutation) -> Result<&[RankedDomain], ReconcileError> {
        if let Some((pending, _)) = &self.pending {
            return Err(ReconcileError::MutationPending {
                pending: pending.action,
                target: pending.target,
            });
        }
        let view = reconcile(&self.authoritative, &mutation);
        let (_, view) = self.pending.insert((mutation, view));
        Ok(view)
    }

    /// The mutation in flight, if any.
    #[must_use]
    pub fn pending(&self) -> Option<PendingMutation> {
        self.pending.as_ref().map(|(mutation, _)| *mutation)
    }

    /// What the viewer sees right now.
    #[must_use]
    pub fn view(&self) -> &[RankedDomain] {
        match &self.pending {
            Some((_, view)) => view,
            None => &self.authoritative,
        }
    }

    /// Adopt the re-fetched page, dropping the speculative view.
    pub fn settle(&mut self, authoritative: Vec<RankedDomain>) {
        self.authoritative = authoritative;
        self.pending = None;
    }

    /// Forget the in-flight mutation, reverting to the last loaded page.
    pub fn abandon(&mut self) {
        self.pending = None;
    }
}
