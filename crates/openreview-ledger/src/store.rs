//! The in-memory versioned record store.

use std::collections::BTreeMap;

use openreview_types::{OpenreviewError, Result};
use sha2::{Digest, Sha256};

use crate::txn::WriteSet;

/// One stored record: opaque bytes plus the ledger-level version counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedRecord {
    pub bytes: Vec<u8>,
    /// Starts at 1 on first write; absent keys read as version 0.
    pub version: u64,
}

/// A deterministic key-value ledger.
///
/// Backed by a `BTreeMap` so iteration (and therefore [`state_digest`])
/// is identical on every replica holding the same logical state.
///
/// [`state_digest`]: InMemoryLedger::state_digest
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    records: BTreeMap<String, VersionedRecord>,
}

impl InMemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&VersionedRecord> {
        self.records.get(key)
    }

    /// Current version of a key; 0 if the key has never been written.
    #[must_use]
    pub fn version(&self, key: &str) -> u64 {
        self.records.get(key).map_or(0, |r| r.version)
    }

    /// Apply a transaction's write-set atomically.
    ///
    /// Every version recorded at read time is revalidated against the live
    /// store first; a single stale read rejects the whole set and nothing
    /// is applied.
    ///
    /// # Errors
    /// Returns [`OpenreviewError::VersionConflict`] naming the first stale
    /// key (in key order, so the error itself is deterministic).
    pub fn commit(&mut self, write_set: WriteSet) -> Result<()> {
        for (key, read_version) in &write_set.read_versions {
            let stored = self.version(key);
            if stored != *read_version {
                return Err(OpenreviewError::VersionConflict {
                    key: key.clone(),
                    read: *read_version,
                    stored,
                });
            }
        }

        let write_count = write_set.writes.len();
        for (key, bytes) in write_set.writes {
            let version = self.version(&key) + 1;
            self.records.insert(key, VersionedRecord { bytes, version });
        }
        tracing::debug!(writes = write_count, "write-set committed");
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// SHA-256 digest over the full sorted key/version/record contents.
    ///
    /// Two replicas that applied the same transactions in the same order
    /// produce the identical digest; any divergence shows up here.
    #[must_use]
    pub fn state_digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(b"openreview:state_digest:v1:");
        for (key, record) in &self.records {
            hasher.update((key.len() as u64).to_le_bytes());
            hasher.update(key.as_bytes());
            hasher.update(record.version.to_le_bytes());
            hasher.update((record.bytes.len() as u64).to_le_bytes());
            hasher.update(&record.bytes);
        }
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn write_set(reads: &[(&str, u64)], writes: &[(&str, &str)]) -> WriteSet {
        WriteSet {
            read_versions: reads
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
            writes: writes
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.as_bytes().to_vec()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn absent_key_is_version_zero() {
        let ledger = InMemoryLedger::new();
        assert_eq!(ledger.version("user/x"), 0);
        assert!(ledger.get("user/x").is_none());
    }

    #[test]
    fn commit_bumps_versions() {
        let mut ledger = InMemoryLedger::new();
        ledger
            .commit(write_set(&[("a", 0)], &[("a", "one")]))
            .unwrap();
        assert_eq!(ledger.version("a"), 1);
        assert_eq!(ledger.get("a").unwrap().bytes, b"one");

        ledger
            .commit(write_set(&[("a", 1)], &[("a", "two")]))
            .unwrap();
        assert_eq!(ledger.version("a"), 2);
        assert_eq!(ledger.get("a").unwrap().bytes, b"two");
    }

    #[test]
    fn stale_read_rejects_whole_set() {
        let mut ledger = InMemoryLedger::new();
        ledger
            .commit(write_set(&[("a", 0)], &[("a", "one")]))
            .unwrap();

        // A second transaction that read version 0 must not commit.
        let err = ledger
            .commit(write_set(&[("a", 0)], &[("a", "clobber"), ("b", "new")]))
            .unwrap_err();
        assert!(matches!(err, OpenreviewError::VersionConflict { .. }));

        // Nothing from the rejected set landed.
        assert_eq!(ledger.get("a").unwrap().bytes, b"one");
        assert!(ledger.get("b").is_none());
    }

    #[test]
    fn conflict_on_key_created_after_absent_read() {
        let mut ledger = InMemoryLedger::new();
        ledger
            .commit(write_set(&[("a", 0)], &[("a", "one")]))
            .unwrap();

        // Read "a" as absent (version 0) while it now exists.
        let err = ledger.commit(write_set(&[("a", 0)], &[])).unwrap_err();
        assert!(
            matches!(err, OpenreviewError::VersionConflict { key, read: 0, stored: 1 } if key == "a")
        );
    }

    #[test]
    fn state_digest_tracks_content() {
        let mut a = InMemoryLedger::new();
        let mut b = InMemoryLedger::new();
        assert_eq!(a.state_digest(), b.state_digest());

        a.commit(write_set(&[("k", 0)], &[("k", "v")])).unwrap();
        assert_ne!(a.state_digest(), b.state_digest());

        b.commit(write_set(&[("k", 0)], &[("k", "v")])).unwrap();
        assert_eq!(a.state_digest(), b.state_digest());
    }
}
