//! # openreview-matchcore
//!
//! **Pure deterministic reviewer matching for OpenReview.**
//!
//! Given a paper's keywords and the pool of registered users, select the
//! top-k reviewers by topical fit. The selection is a pure function of the
//! ledger snapshot:
//!
//! - **Zero side effects**: no record mutation, no worklist updates
//! - **Deterministic output**: same snapshot + same paper → same ordered
//!   reviewer list on every replica
//! - **Specialist scoring**: a candidate's score is the *maximum* similarity
//!   over all (keyword, research-area) pairs, not the sum — one strong
//!   topical overlap outweighs many weak ones
//! - **Fixed tie-break**: equal scores order by user ID ascending

pub mod matcher;
pub mod similarity;

pub use matcher::select_reviewers;
pub use similarity::{aggregate_score, pair_score, record_similarity};
