//! Deterministic identifiers used throughout OpenReview.
//!
//! The engine runs as replicated state-transition logic: every replica must
//! derive the identical ID from the same transaction inputs. IDs are
//! therefore domain-separated SHA-256 digests folded into UUIDs, never
//! random values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

fn digest_uuid(domain: &[u8], payload: &[u8]) -> Uuid {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(payload);
    let hash = hasher.finalize();
    let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
    Uuid::from_bytes(bytes)
}

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// Stable identifier for a registered user.
///
/// Derived from the user's name. Names are globally unique and immutable
/// after registration, so the mapping never changes and every replica
/// agrees on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    #[must_use]
    pub fn derive(name: &str) -> Self {
        Self(digest_uuid(b"openreview:user_id:v1:", name.as_bytes()))
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

// ---------------------------------------------------------------------------
// PaperId
// ---------------------------------------------------------------------------

/// Stable identifier for a submitted paper.
///
/// Derived from the global submission sequence number, not the title:
/// titles are mutable, and deriving from them would let a rename followed
/// by a new submission reuse an existing ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PaperId(pub Uuid);

impl PaperId {
    #[must_use]
    pub fn derive(sequence: u64) -> Self {
        Self(digest_uuid(
            b"openreview:paper_id:v1:",
            &sequence.to_le_bytes(),
        ))
    }
}

impl fmt::Display for PaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PaperId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

// ---------------------------------------------------------------------------
// RebuttalId
// ---------------------------------------------------------------------------

/// Per-review rebuttal sequence number.
///
/// Allocated from an explicit monotonic counter on the owning [`Review`],
/// starting at 0 and never reused.
///
/// [`Review`]: crate::Review
pub type RebuttalId = u64;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
