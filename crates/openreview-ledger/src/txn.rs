//! Per-invocation transaction handle.
//!
//! A `StateTxn` is the only way core operations touch the ledger: reads go
//! through the snapshot (recording observed versions), writes are staged
//! until the invocation succeeds. Dropping the transaction discards all
//! staged writes, so an operation that errors leaves no partial state
//! behind.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use openreview_types::{OpenreviewError, Result};
use serde::{Serialize, de::DeserializeOwned};

use crate::store::InMemoryLedger;

/// The outcome of a successful transaction: validated reads plus staged
/// writes, applied atomically by [`InMemoryLedger::commit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    /// Version of every key observed by the transaction (0 = absent).
    pub read_versions: BTreeMap<String, u64>,
    /// Serialized records to store, keyed by ledger key.
    pub writes: BTreeMap<String, Vec<u8>>,
}

/// A read-through snapshot handle with staged writes.
pub struct StateTxn<'a> {
    ledger: &'a InMemoryLedger,
    tx_time: DateTime<Utc>,
    read_versions: BTreeMap<String, u64>,
    writes: BTreeMap<String, Vec<u8>>,
}

impl<'a> StateTxn<'a> {
    /// Open a transaction over the current ledger snapshot.
    ///
    /// `tx_time` is the platform-assigned transaction timestamp: every
    /// replica applying this invocation receives the same value, so record
    /// timestamps stay deterministic. The core never reads the wall clock.
    #[must_use]
    pub fn begin(ledger: &'a InMemoryLedger, tx_time: DateTime<Utc>) -> Self {
        Self {
            ledger,
            tx_time,
            read_versions: BTreeMap::new(),
            writes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn tx_time(&self) -> DateTime<Utc> {
        self.tx_time
    }

    /// Read and decode a record. Staged writes shadow the snapshot, so a
    /// transaction always sees its own effects.
    ///
    /// # Errors
    /// Returns `Serialization` if stored bytes fail to decode.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        if let Some(bytes) = self.writes.get(key) {
            return decode(bytes).map(Some);
        }

        self.read_versions
            .entry(key.to_string())
            .or_insert_with(|| self.ledger.version(key));

        match self.ledger.get(key) {
            Some(record) => decode(&record.bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Encode and stage a record write.
    ///
    /// The key's current version is captured so blind writes still
    /// participate in conflict detection.
    pub fn put<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.read_versions
            .entry(key.to_string())
            .or_insert_with(|| self.ledger.version(key));
        let bytes = serde_json::to_vec(value)
            .map_err(|e| OpenreviewError::Serialization(e.to_string()))?;
        self.writes.insert(key.to_string(), bytes);
        Ok(())
    }

    /// Number of staged writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Consume the transaction into its commit payload.
    #[must_use]
    pub fn into_write_set(self) -> WriteSet {
        WriteSet {
            read_versions: self.read_versions,
            writes: self.writes,
        }
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| OpenreviewError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn read_your_writes() {
        let ledger = InMemoryLedger::new();
        let mut txn = StateTxn::begin(&ledger, tx_time());

        assert_eq!(txn.get::<u32>("counter").unwrap(), None);
        txn.put("counter", &7u32).unwrap();
        assert_eq!(txn.get::<u32>("counter").unwrap(), Some(7));
    }

    #[test]
    fn commit_applies_staged_writes() {
        let mut ledger = InMemoryLedger::new();
        {
            let mut txn = StateTxn::begin(&ledger, tx_time());
            txn.put("a", &"one").unwrap();
            txn.put("b", &"two").unwrap();
            let ws = txn.into_write_set();
            ledger.commit(ws).unwrap();
        }
        assert_eq!(ledger.version("a"), 1);
        assert_eq!(ledger.version("b"), 1);
    }

    #[test]
    fn dropped_txn_leaves_no_trace() {
        let ledger = InMemoryLedger::new();
        {
            let mut txn = StateTxn::begin(&ledger, tx_time());
            txn.put("a", &"one").unwrap();
            // txn dropped without commit
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn conflicting_txns_second_commit_fails() {
        let mut ledger = InMemoryLedger::new();

        // Two transactions read the same (absent) key from the same snapshot.
        let ws1 = {
            let mut txn = StateTxn::begin(&ledger, tx_time());
            assert_eq!(txn.get::<u32>("counter").unwrap(), None);
            txn.put("counter", &1u32).unwrap();
            txn.into_write_set()
        };
        let ws2 = {
            let mut txn = StateTxn::begin(&ledger, tx_time());
            assert_eq!(txn.get::<u32>("counter").unwrap(), None);
            txn.put("counter", &2u32).unwrap();
            txn.into_write_set()
        };

        ledger.commit(ws1).unwrap();
        let err = ledger.commit(ws2).unwrap_err();
        assert!(matches!(err, OpenreviewError::VersionConflict { .. }));

        // First writer won; the loser retries against the fresh snapshot.
        let mut txn = StateTxn::begin(&ledger, tx_time());
        assert_eq!(txn.get::<u32>("counter").unwrap(), Some(1));
    }

    #[test]
    fn tx_time_is_exposed() {
        let ledger = InMemoryLedger::new();
        let txn = StateTxn::begin(&ledger, tx_time());
        assert_eq!(txn.tx_time(), tx_time());
    }
}
