//! Paper records and the paper state machine.
//!
//! A paper is either open for review (`UnderReview`) or closed forever
//! (`Finalized`). The escrow locked at submission is positive exactly while
//! the paper is under review and zero after settlement.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{OpenreviewError, PaperId, Result, Review, UserId};

/// Lifecycle state of a paper. There are no other states: finality is
/// terminal and immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperState {
    UnderReview,
    Finalized { accepted: bool },
}

impl PaperState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finalized { .. })
    }
}

/// A submitted paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: PaperId,
    /// Mutable, but globally unique among active titles.
    pub title: String,
    pub keywords: Vec<String>,
    /// The author who paid the submission fee. Always present in
    /// `author_ids`.
    pub submitter: UserId,
    pub author_ids: Vec<UserId>,
    /// Fixed at submission time; matching is never re-run.
    pub reviewer_ids: Vec<UserId>,
    /// At most one review per assigned reviewer.
    pub reviews: BTreeMap<UserId, Review>,
    /// Tokens locked from the submitter, released only at settlement.
    pub escrow: Decimal,
    pub state: PaperState,
    /// Moderator reject/un-reject flag. Consulted when finality fires;
    /// untouchable once the paper is finalized.
    pub editorial_hold: bool,
    pub submitted_at: DateTime<Utc>,
}

impl Paper {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PaperId,
        title: &str,
        keywords: Vec<String>,
        submitter: UserId,
        author_ids: Vec<UserId>,
        reviewer_ids: Vec<UserId>,
        escrow: Decimal,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            keywords,
            submitter,
            author_ids,
            reviewer_ids,
            reviews: BTreeMap::new(),
            escrow,
            state: PaperState::UnderReview,
            editorial_hold: false,
            submitted_at,
        }
    }

    #[must_use]
    pub fn is_under_review(&self) -> bool {
        self.state == PaperState::UnderReview
    }

    #[must_use]
    pub fn is_author(&self, user: UserId) -> bool {
        self.author_ids.contains(&user)
    }

    #[must_use]
    pub fn is_reviewer(&self, user: UserId) -> bool {
        self.reviewer_ids.contains(&user)
    }

    /// Count (valid, invalid) votes among the reviews filed so far.
    #[must_use]
    pub fn vote_counts(&self) -> (usize, usize) {
        let valid = self.reviews.values().filter(|r| r.valid).count();
        (valid, self.reviews.len() - valid)
    }

    /// Fail with `InvalidStateTransition` unless the paper is still open.
    pub fn ensure_open(&self, operation: &str) -> Result<()> {
        if self.is_under_review() {
            Ok(())
        } else {
            Err(OpenreviewError::InvalidStateTransition {
                paper: self.id,
                reason: format!("{operation} on a finalized paper"),
            })
        }
    }
}
