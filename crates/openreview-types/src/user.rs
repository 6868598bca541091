//! User records and credential storage.
//!
//! A user unifies the author and reviewer roles: one balance, one set of
//! research areas, and three worklists (committed papers, assigned papers
//! not yet reviewed, assigned papers already reviewed). An assigned paper
//! lives in exactly one of the latter two at a time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{OpenreviewError, PaperId, Result, UserId};

// ---------------------------------------------------------------------------
// CredentialHash
// ---------------------------------------------------------------------------

/// Salted SHA-256 credential digest.
///
/// The salt is derived deterministically from the user's name so every
/// replica stores identical bytes for the same registration. Verification
/// recomputes the digest from the stored salt; the stored secret is never
/// exposed or compared in plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialHash {
    salt: String,
    digest: String,
}

impl CredentialHash {
    #[must_use]
    pub fn derive(name: &str, credential: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"openreview:credential_salt:v1:");
        hasher.update(name.as_bytes());
        let salt = hex::encode(hasher.finalize());
        let digest = Self::digest_with(&salt, credential);
        Self { salt, digest }
    }

    fn digest_with(salt: &str, credential: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(credential.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Check a candidate credential against the stored digest.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        Self::digest_with(&self.salt, candidate) == self.digest
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered user. Created once, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub credential: CredentialHash,
    pub email: String,
    /// Fungible token balance (the incentive currency).
    pub balance: Decimal,
    /// Ordered, deduplicated topic tags used for reviewer matching.
    pub research_areas: Vec<String>,
    /// Papers this user co-authored.
    pub committed_papers: Vec<PaperId>,
    /// Papers assigned for review, review not yet filed.
    pub assigned_unreviewed: Vec<PaperId>,
    /// Papers assigned for review, review filed.
    pub assigned_reviewed: Vec<PaperId>,
}

impl User {
    /// Build a fresh user record. The ID and credential hash are derived
    /// from the name, so registration is replay-identical on every replica.
    #[must_use]
    pub fn new(
        name: &str,
        credential: &str,
        email: &str,
        research_areas: Vec<String>,
        initial_balance: Decimal,
    ) -> Self {
        Self {
            id: UserId::derive(name),
            name: name.to_string(),
            credential: CredentialHash::derive(name, credential),
            email: email.to_string(),
            balance: initial_balance,
            research_areas: dedup_ordered(research_areas),
            committed_papers: Vec::new(),
            assigned_unreviewed: Vec::new(),
            assigned_reviewed: Vec::new(),
        }
    }

    /// Remove `amount` from the balance.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the balance is short; the record is
    /// unchanged on failure.
    pub fn debit(&mut self, amount: Decimal) -> Result<()> {
        if self.balance < amount {
            return Err(OpenreviewError::InsufficientBalance {
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Add `amount` to the balance.
    pub fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
    }

    /// Replace the research areas, deduplicating while preserving order.
    pub fn set_research_areas(&mut self, tags: Vec<String>) {
        self.research_areas = dedup_ordered(tags);
    }

    /// Record a new review assignment.
    pub fn assign_paper(&mut self, paper: PaperId) {
        self.assigned_unreviewed.push(paper);
    }

    /// Move a paper from the unreviewed worklist to the reviewed one.
    pub fn mark_reviewed(&mut self, paper: PaperId) {
        if let Some(pos) = self.assigned_unreviewed.iter().position(|p| *p == paper) {
            self.assigned_unreviewed.remove(pos);
        }
        self.assigned_reviewed.push(paper);
    }
}

/// Drop repeated tags while preserving first-seen order.
fn dedup_ordered(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    tags.into_iter().filter(|t| seen.insert(t.clone())).collect()
}
