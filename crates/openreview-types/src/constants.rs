//! System-wide constants for the OpenReview engine.

/// Decimal places used when splitting escrow and penalty payouts.
pub const TOKEN_SCALE: u32 = 8;

/// Tokens granted to every newly registered user.
pub const DEFAULT_INITIAL_BALANCE: i64 = 100;

/// Submission fee locked into escrow when a paper is created.
pub const DEFAULT_SUBMISSION_FEE: i64 = 3;

/// Penalty distributed to reviewers when a paper is rejected.
pub const DEFAULT_REJECTION_PENALTY: i64 = 1;

/// Reviewers assigned to each submitted paper.
pub const DEFAULT_REVIEWERS_PER_PAPER: usize = 3;

/// Separator for multi-valued string arguments (author lists, keywords,
/// research areas) on the invocation surface.
pub const LIST_SEPARATOR: char = '/';

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenReview";
