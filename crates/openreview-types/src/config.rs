//! Engine configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants;

/// Tunable parameters of the review economy.
///
/// All replicas must run with identical configuration; the values feed
/// directly into settlement arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tokens debited from the submitter into escrow at submission.
    pub submission_fee: Decimal,
    /// Tokens distributed to reviewers when a paper is rejected. Capped at
    /// the escrow during settlement.
    pub rejection_penalty: Decimal,
    /// Number of reviewers the matcher must select per paper.
    pub reviewers_per_paper: usize,
    /// Tokens granted to each newly registered user.
    pub initial_balance: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            submission_fee: Decimal::from(constants::DEFAULT_SUBMISSION_FEE),
            rejection_penalty: Decimal::from(constants::DEFAULT_REJECTION_PENALTY),
            reviewers_per_paper: constants::DEFAULT_REVIEWERS_PER_PAPER,
            initial_balance: Decimal::from(constants::DEFAULT_INITIAL_BALANCE),
        }
    }
}
