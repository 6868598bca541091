//! # openreview-settlement
//!
//! **Finality plane**: once a paper's last assigned review lands, decide
//! accept/reject from the vote and settle the escrowed tokens.
//!
//! ## Flow
//!
//! 1. [`evaluate`] is a pure function of the paper record: pending until
//!    every assigned reviewer has voted, then strict majority (with the
//!    editorial hold forcing rejection).
//! 2. [`settle`] executes the verdict inside the caller's transaction:
//!    escrow split among valid-voting reviewers on acceptance, penalty
//!    split among all reviewers plus submitter refund on rejection.
//! 3. The `UnderReview → Finalized` transition is the exactly-once guard:
//!    it is checked and set inside the same atomic write-set, so two
//!    near-simultaneous "final" reviews can never pay out twice.
//!
//! Payout division is exact: shares are rounded toward zero at
//! `TOKEN_SCALE` and the remainder goes to the first recipient, so the
//! total token supply is conserved to the last digit — audited by
//! [`audit_supply`].

pub mod hold;
pub mod payout;
pub mod supply;
pub mod verdict;

pub use hold::set_editorial_hold;
pub use payout::{SettlementOutcome, distribute_evenly, finalize_if_quorum, settle};
pub use supply::{TokenSupply, audit_supply, record_mint};
pub use verdict::{Verdict, evaluate};
