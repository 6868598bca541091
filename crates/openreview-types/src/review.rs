//! Review and rebuttal records.
//!
//! A review is created exactly once per (paper, reviewer) pair and its
//! content and vote never change afterwards; only the rebuttal thread
//! attached to it grows. Rebuttal IDs come from an explicit monotonic
//! counter on the review, so an ID is never reused.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{RebuttalId, UserId};

/// One author question and (eventual) reviewer answer attached to a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebuttal {
    pub id: RebuttalId,
    pub author_id: UserId,
    pub reviewer_id: UserId,
    pub question: String,
    /// Empty until the reviewer answers.
    pub reply: String,
    pub replied: bool,
}

/// A reviewer's verdict on one paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub reviewer_id: UserId,
    pub content: String,
    /// The vote: does the paper meet the bar?
    pub valid: bool,
    pub submitted_at: DateTime<Utc>,
    pub rebuttals: BTreeMap<RebuttalId, Rebuttal>,
    /// Next rebuttal sequence number. Monotonic, never reset.
    pub next_rebuttal_id: RebuttalId,
}

impl Review {
    #[must_use]
    pub fn new(reviewer_id: UserId, content: &str, valid: bool, submitted_at: DateTime<Utc>) -> Self {
        Self {
            reviewer_id,
            content: content.to_string(),
            valid,
            submitted_at,
            rebuttals: BTreeMap::new(),
            next_rebuttal_id: 0,
        }
    }

    /// Append a new unreplied rebuttal and return its ID.
    pub fn open_rebuttal(&mut self, author_id: UserId, question: &str) -> RebuttalId {
        let id = self.next_rebuttal_id;
        self.next_rebuttal_id += 1;
        self.rebuttals.insert(
            id,
            Rebuttal {
                id,
                author_id,
                reviewer_id: self.reviewer_id,
                question: question.to_string(),
                reply: String::new(),
                replied: false,
            },
        );
        id
    }

    /// The rebuttal with this ID, if it exists and is still unanswered.
    pub fn open_rebuttal_mut(&mut self, id: RebuttalId) -> Option<&mut Rebuttal> {
        self.rebuttals.get_mut(&id).filter(|r| !r.replied)
    }
}
