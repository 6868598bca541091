//! # openreview-types
//!
//! Shared types, errors, and configuration for the **OpenReview**
//! peer-review workflow engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`UserId`], [`PaperId`], [`RebuttalId`]
//! - **User model**: [`User`], [`CredentialHash`]
//! - **Paper model**: [`Paper`], [`PaperState`]
//! - **Review model**: [`Review`], [`Rebuttal`]
//! - **Matching model**: [`SimilarityPair`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`OpenreviewError`] with `OR_ERR_` prefix codes
//! - **Constants**: system-wide defaults and limits
//!
//! Every record type keeps its collections in deterministic order
//! (`BTreeMap`, insertion-ordered `Vec`) so that independent replicas
//! serializing the same logical state produce identical bytes.

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod paper;
pub mod review;
pub mod similarity;
pub mod user;

// Re-export all primary types at crate root for ergonomic imports:
//   use openreview_types::{User, Paper, Review, OpenreviewError, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use paper::*;
pub use review::*;
pub use similarity::*;
pub use user::*;

// Constants are accessed via `openreview_types::constants::FOO`
// (not re-exported to avoid name collisions).
