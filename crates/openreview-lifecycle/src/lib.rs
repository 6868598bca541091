//! # openreview-lifecycle
//!
//! The paper lifecycle plane: user registration and credentials, paper
//! submission (with reviewer matching and escrow), review and rebuttal
//! exchange, and the flat string-argument invocation surface.
//!
//! ## State machine
//!
//! ```text
//! SubmitPaper ──▶ UnderReview ──(last AddReview → quorum)──▶ Finalized
//! ```
//!
//! Every operation runs inside one [`StateTxn`] and is atomic: either the
//! full write-set commits or nothing does. A submission that debits the
//! fee, creates the paper, and updates five worklists can never be
//! observed half-applied.
//!
//! [`StateTxn`]: openreview_ledger::StateTxn

pub mod contract;
pub mod queries;
pub mod registry;
pub mod review;
pub mod submission;

pub use contract::ReviewEngine;
pub use queries::{PaperInfo, UserInfo, paper_info, user_info};
pub use registry::{register_user, transfer, update_profile, validate_user};
pub use review::{add_rebuttal, add_reply, add_review};
pub use submission::{submit_paper, update_metadata};
