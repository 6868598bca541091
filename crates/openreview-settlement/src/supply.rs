//! Token supply conservation.
//!
//! Mathematical invariant audited after settlement cycles:
//! ```text
//! Σ user balances + Σ open escrows == Σ minted at registration
//! ```
//! Registration is the only mint; submission moves tokens into escrow and
//! settlement moves them back out, so the total never changes. If the
//! invariant breaks, something has gone catastrophically wrong.

use openreview_ledger::{Directory, StateTxn, TitleIndex, keys, load_paper, load_user};
use openreview_types::{OpenreviewError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Singleton record tracking the total tokens ever minted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSupply {
    pub minted: Decimal,
}

impl TokenSupply {
    pub fn load(txn: &mut StateTxn<'_>) -> Result<Self> {
        Ok(txn.get(keys::SUPPLY_KEY)?.unwrap_or_default())
    }

    pub fn store(&self, txn: &mut StateTxn<'_>) -> Result<()> {
        txn.put(keys::SUPPLY_KEY, self)
    }
}

/// Record newly minted tokens (called when a user registers and receives
/// the initial balance grant).
pub fn record_mint(txn: &mut StateTxn<'_>, amount: Decimal) -> Result<()> {
    let mut supply = TokenSupply::load(txn)?;
    supply.minted += amount;
    supply.store(txn)
}

/// Verify token conservation across the whole ledger.
///
/// Walks every user (via the directory) and every paper (via the title
/// index), also checking the per-paper invariant that escrow is positive
/// exactly while the paper is under review.
///
/// # Errors
/// Returns `SupplyInvariantViolation` naming the discrepancy.
pub fn audit_supply(txn: &mut StateTxn<'_>) -> Result<Decimal> {
    let minted = TokenSupply::load(txn)?.minted;

    let directory = Directory::load(txn)?;
    let mut circulating = Decimal::ZERO;
    for id in directory.ids_by_name().collect::<Vec<_>>() {
        circulating += load_user(txn, id)?.balance;
    }

    let index = TitleIndex::load(txn)?;
    let mut escrowed = Decimal::ZERO;
    for id in index.titles.values().copied().collect::<Vec<_>>() {
        let paper = load_paper(txn, id)?;
        if paper.is_under_review() != (paper.escrow > Decimal::ZERO) {
            return Err(OpenreviewError::SupplyInvariantViolation {
                reason: format!(
                    "paper {} escrow {} inconsistent with state {:?}",
                    paper.id, paper.escrow, paper.state
                ),
            });
        }
        escrowed += paper.escrow;
    }

    let actual = circulating + escrowed;
    if actual != minted {
        return Err(OpenreviewError::SupplyInvariantViolation {
            reason: format!(
                "actual supply {actual} != minted {minted} (balances={circulating}, escrow={escrowed})"
            ),
        });
    }
    Ok(actual)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use openreview_ledger::{InMemoryLedger, store_paper, store_user};
    use openreview_types::{Paper, PaperState, User, UserId};

    use super::*;

    #[test]
    fn empty_ledger_audits_clean() {
        let ledger = InMemoryLedger::new();
        let mut txn = StateTxn::begin(&ledger, Utc::now());
        assert_eq!(audit_supply(&mut txn).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn mint_accumulates() {
        let ledger = InMemoryLedger::new();
        let mut txn = StateTxn::begin(&ledger, Utc::now());
        record_mint(&mut txn, Decimal::from(100)).unwrap();
        record_mint(&mut txn, Decimal::from(50)).unwrap();
        assert_eq!(TokenSupply::load(&mut txn).unwrap().minted, Decimal::from(150));
    }

    #[test]
    fn balances_plus_escrow_must_equal_minted() {
        let mut ledger = InMemoryLedger::new();
        let ws = {
            let mut txn = StateTxn::begin(&ledger, Utc::now());
            record_mint(&mut txn, Decimal::from(100)).unwrap();

            let mut user = User::new("alice", "pw", "a@x.org", vec![], Decimal::from(100));
            user.balance = Decimal::from(97);
            let mut directory = Directory::default();
            directory.insert("alice", user.id).unwrap();
            directory.store(&mut txn).unwrap();
            store_user(&mut txn, &user).unwrap();

            let mut index = TitleIndex::default();
            let paper_id = index.claim("Escrowed").unwrap();
            index.store(&mut txn).unwrap();
            let paper = Paper::new(
                paper_id,
                "Escrowed",
                vec![],
                user.id,
                vec![user.id],
                vec![UserId::derive("rev")],
                Decimal::from(3),
                Utc::now(),
            );
            store_paper(&mut txn, &paper).unwrap();
            txn.into_write_set()
        };
        ledger.commit(ws).unwrap();

        let mut txn = StateTxn::begin(&ledger, Utc::now());
        assert_eq!(audit_supply(&mut txn).unwrap(), Decimal::from(100));
    }

    #[test]
    fn missing_tokens_are_detected() {
        let mut ledger = InMemoryLedger::new();
        let ws = {
            let mut txn = StateTxn::begin(&ledger, Utc::now());
            record_mint(&mut txn, Decimal::from(100)).unwrap();
            let user = User::new("alice", "pw", "a@x.org", vec![], Decimal::from(90));
            let mut directory = Directory::default();
            directory.insert("alice", user.id).unwrap();
            directory.store(&mut txn).unwrap();
            store_user(&mut txn, &user).unwrap();
            txn.into_write_set()
        };
        ledger.commit(ws).unwrap();

        let mut txn = StateTxn::begin(&ledger, Utc::now());
        let err = audit_supply(&mut txn).unwrap_err();
        assert!(matches!(
            err,
            OpenreviewError::SupplyInvariantViolation { .. }
        ));
    }

    #[test]
    fn escrow_state_mismatch_is_detected() {
        let mut ledger = InMemoryLedger::new();
        let ws = {
            let mut txn = StateTxn::begin(&ledger, Utc::now());
            let mut index = TitleIndex::default();
            let paper_id = index.claim("Inconsistent").unwrap();
            index.store(&mut txn).unwrap();

            // Finalized paper that still holds escrow: invariant breach.
            let submitter = UserId::derive("s");
            let mut paper = Paper::new(
                paper_id,
                "Inconsistent",
                vec![],
                submitter,
                vec![submitter],
                vec![],
                Decimal::from(3),
                Utc::now(),
            );
            paper.state = PaperState::Finalized { accepted: false };
            store_paper(&mut txn, &paper).unwrap();
            record_mint(&mut txn, Decimal::from(3)).unwrap();
            txn.into_write_set()
        };
        ledger.commit(ws).unwrap();

        let mut txn = StateTxn::begin(&ledger, Utc::now());
        let err = audit_supply(&mut txn).unwrap_err();
        assert!(matches!(
            err,
            OpenreviewError::SupplyInvariantViolation { .. }
        ));
    }
}
