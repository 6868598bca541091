//! # openreview-ledger
//!
//! The ledger substrate the OpenReview core runs against: a versioned
//! key-value store with snapshot reads and all-or-nothing write-sets.
//!
//! The hosting platform serializes concurrent invocations into one global
//! order; this crate models that contract locally:
//!
//! 1. An invocation opens a [`StateTxn`] over an immutable ledger snapshot.
//! 2. Reads record the observed version of every key they touch.
//! 3. Writes are staged in the transaction (read-your-writes).
//! 4. On success the staged [`WriteSet`] is committed: every recorded
//!    version is revalidated (optimistic concurrency) and then all writes
//!    land atomically — or none do.
//!
//! Records are flat, versionless JSON documents; the per-key `version`
//! counter is concurrency metadata, not a schema version.

pub mod directory;
pub mod keys;
pub mod records;
pub mod store;
pub mod txn;

pub use directory::{Directory, TitleIndex};
pub use records::{load_paper, load_user, store_paper, store_user};
pub use store::{InMemoryLedger, VersionedRecord};
pub use txn::{StateTxn, WriteSet};
