//! Error types for the OpenReview engine.
//!
//! All errors use the `OR_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Directory / user errors
//! - 2xx: Balance errors
//! - 3xx: Paper errors
//! - 4xx: Review / rebuttal errors
//! - 5xx: Matching errors
//! - 7xx: Ledger errors
//! - 8xx: Supply errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{PaperId, RebuttalId, UserId};

/// Central error enum for all OpenReview operations.
///
/// Every failure aborts the whole transaction: an operation that returns an
/// error leaves no writes behind.
#[derive(Debug, Error)]
pub enum OpenreviewError {
    // =================================================================
    // Directory / User Errors (1xx)
    // =================================================================
    /// No user is registered under this name.
    #[error("OR_ERR_100: user not found: {name}")]
    UserNotFound { name: String },

    /// A user with this name already exists.
    #[error("OR_ERR_101: user name already taken: {name}")]
    DuplicateName { name: String },

    /// Credential check failed for this user.
    #[error("OR_ERR_102: wrong credential for user {name}")]
    WrongCredential { name: String },

    /// A user ID argument could not be parsed.
    #[error("OR_ERR_103: malformed user id: {raw}")]
    InvalidUserId { raw: String },

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// Not enough balance to pay a fee or transfer.
    #[error("OR_ERR_200: insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    // =================================================================
    // Paper Errors (3xx)
    // =================================================================
    /// No paper is registered under this title.
    #[error("OR_ERR_300: paper not found: {title}")]
    PaperNotFound { title: String },

    /// A paper with this title already exists.
    #[error("OR_ERR_301: paper title already in use: {title}")]
    DuplicateTitle { title: String },

    /// The operation is not allowed in the paper's current state
    /// (e.g. reviewing a finalized paper, or settling twice).
    #[error("OR_ERR_302: invalid state transition for paper {paper}: {reason}")]
    InvalidStateTransition { paper: PaperId, reason: String },

    // =================================================================
    // Review / Rebuttal Errors (4xx)
    // =================================================================
    /// The caller is not one of the paper's assigned reviewers.
    #[error("OR_ERR_400: reviewer {reviewer} is not assigned to paper {paper}")]
    NotAssigned { reviewer: UserId, paper: PaperId },

    /// The reviewer already filed a review for this paper.
    #[error("OR_ERR_401: reviewer {reviewer} already reviewed paper {paper}")]
    AlreadyReviewed { reviewer: UserId, paper: PaperId },

    /// No review by this reviewer exists on the paper.
    #[error("OR_ERR_402: no review by reviewer {reviewer} on paper {paper}")]
    ReviewNotFound { reviewer: UserId, paper: PaperId },

    /// The rebuttal does not exist, or has already been replied to.
    #[error("OR_ERR_403: no open rebuttal {rebuttal} on paper {paper}")]
    RebuttalNotFound { rebuttal: RebuttalId, paper: PaperId },

    // =================================================================
    // Matching Errors (5xx)
    // =================================================================
    /// Fewer eligible reviewers exist than the paper requires.
    #[error("OR_ERR_500: insufficient eligible reviewers: need {needed}, have {available}")]
    InsufficientReviewers { needed: usize, available: usize },

    // =================================================================
    // Ledger Errors (7xx)
    // =================================================================
    /// Optimistic concurrency check failed: a key read by the transaction
    /// changed before commit. The caller may retry with a fresh read.
    #[error("OR_ERR_700: version conflict on key {key}: read {read}, stored {stored}")]
    VersionConflict { key: String, read: u64, stored: u64 },

    /// Record encode/decode error.
    #[error("OR_ERR_701: serialization error: {0}")]
    Serialization(String),

    // =================================================================
    // Supply Errors (8xx)
    // =================================================================
    /// Token conservation invariant violated — critical safety alert.
    #[error("OR_ERR_800: supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OR_ERR_900: internal error: {0}")]
    Internal(String),

    /// An invocation argument was malformed or missing.
    #[error("OR_ERR_901: invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The invocation named an operation the engine does not expose.
    #[error("OR_ERR_902: unknown operation: {0}")]
    UnknownOperation(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenreviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = OpenreviewError::UserNotFound {
            name: "alice".into(),
        };
        let msg = format!("{err}");
        assert!(msg.starts_with("OR_ERR_100"), "Got: {msg}");
        assert!(msg.contains("alice"));
    }

    #[test]
    fn insufficient_balance_display() {
        let err = OpenreviewError::InsufficientBalance {
            needed: Decimal::new(3, 0),
            available: Decimal::new(1, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("OR_ERR_200"));
        assert!(msg.contains('3'));
        assert!(msg.contains('1'));
    }

    #[test]
    fn version_conflict_display() {
        let err = OpenreviewError::VersionConflict {
            key: "user/x".into(),
            read: 2,
            stored: 3,
        };
        let msg = format!("{err}");
        assert!(msg.contains("OR_ERR_700"));
        assert!(msg.contains("user/x"));
    }

    #[test]
    fn all_errors_have_or_err_prefix() {
        let paper = PaperId::derive(0);
        let reviewer = UserId::derive("r");
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(OpenreviewError::DuplicateName { name: "n".into() }),
            Box::new(OpenreviewError::DuplicateTitle { title: "t".into() }),
            Box::new(OpenreviewError::NotAssigned { reviewer, paper }),
            Box::new(OpenreviewError::AlreadyReviewed { reviewer, paper }),
            Box::new(OpenreviewError::InsufficientReviewers {
                needed: 3,
                available: 1,
            }),
            Box::new(OpenreviewError::SupplyInvariantViolation {
                reason: "test".into(),
            }),
            Box::new(OpenreviewError::UnknownOperation("Frobnicate".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("OR_ERR_"),
                "Error missing OR_ERR_ prefix: {msg}"
            );
        }
    }
}
