//! Directory and title index records.
//!
//! The directory is the name → ID mapping the core consults on every
//! by-name operation; the title index enforces global title uniqueness and
//! carries the monotonic submission sequence that paper IDs derive from.
//! Both are `BTreeMap`-backed, so enumeration order is fixed across
//! replicas without any explicit sorting step.

use std::collections::BTreeMap;

use openreview_types::{OpenreviewError, PaperId, Result, UserId};
use serde::{Deserialize, Serialize};

use crate::{keys, txn::StateTxn};

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// Name → user ID mapping for all registered users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub users: BTreeMap<String, UserId>,
}

impl Directory {
    /// Load the directory, or an empty one if no user registered yet.
    pub fn load(txn: &mut StateTxn<'_>) -> Result<Self> {
        Ok(txn.get(keys::DIRECTORY_KEY)?.unwrap_or_default())
    }

    pub fn store(&self, txn: &mut StateTxn<'_>) -> Result<()> {
        txn.put(keys::DIRECTORY_KEY, self)
    }

    /// Resolve a name to its user ID.
    ///
    /// # Errors
    /// Returns `UserNotFound` for unregistered names.
    pub fn resolve(&self, name: &str) -> Result<UserId> {
        self.users
            .get(name)
            .copied()
            .ok_or_else(|| OpenreviewError::UserNotFound {
                name: name.to_string(),
            })
    }

    /// Register a new name.
    ///
    /// # Errors
    /// Returns `DuplicateName` if the name is already taken.
    pub fn insert(&mut self, name: &str, id: UserId) -> Result<()> {
        if self.users.contains_key(name) {
            return Err(OpenreviewError::DuplicateName {
                name: name.to_string(),
            });
        }
        self.users.insert(name.to_string(), id);
        Ok(())
    }

    /// All registered user IDs in name order — the matcher's candidate
    /// enumeration order.
    pub fn ids_by_name(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.values().copied()
    }
}

// ---------------------------------------------------------------------------
// TitleIndex
// ---------------------------------------------------------------------------

/// Active title → paper ID mapping plus the submission sequence counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleIndex {
    pub titles: BTreeMap<String, PaperId>,
    /// Total papers ever submitted; the next paper's ID derives from this.
    pub next_seq: u64,
}

impl TitleIndex {
    pub fn load(txn: &mut StateTxn<'_>) -> Result<Self> {
        Ok(txn.get(keys::TITLE_INDEX_KEY)?.unwrap_or_default())
    }

    pub fn store(&self, txn: &mut StateTxn<'_>) -> Result<()> {
        txn.put(keys::TITLE_INDEX_KEY, self)
    }

    /// Resolve an active title to its paper ID.
    ///
    /// # Errors
    /// Returns `PaperNotFound` for unknown titles.
    pub fn resolve(&self, title: &str) -> Result<PaperId> {
        self.titles
            .get(title)
            .copied()
            .ok_or_else(|| OpenreviewError::PaperNotFound {
                title: title.to_string(),
            })
    }

    /// Claim a fresh title, allocating the next paper ID.
    ///
    /// # Errors
    /// Returns `DuplicateTitle` if the title is in use.
    pub fn claim(&mut self, title: &str) -> Result<PaperId> {
        if self.titles.contains_key(title) {
            return Err(OpenreviewError::DuplicateTitle {
                title: title.to_string(),
            });
        }
        let id = PaperId::derive(self.next_seq);
        self.next_seq += 1;
        self.titles.insert(title.to_string(), id);
        Ok(id)
    }

    /// Move a paper to a new title, freeing the old one.
    ///
    /// Renaming a title to itself is allowed (metadata updates that only
    /// add authors pass the unchanged title through).
    ///
    /// # Errors
    /// `PaperNotFound` if `old` is not active; `DuplicateTitle` if `new`
    /// is held by a different paper.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<PaperId> {
        let id = self.resolve(old)?;
        if old == new {
            return Ok(id);
        }
        if self.titles.contains_key(new) {
            return Err(OpenreviewError::DuplicateTitle {
                title: new.to_string(),
            });
        }
        self.titles.remove(old);
        self.titles.insert(new.to_string(), id);
        Ok(id)
    }
}
