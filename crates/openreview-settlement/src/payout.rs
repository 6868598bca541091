//! Escrow settlement execution.

use openreview_ledger::{StateTxn, load_user, store_paper, store_user};
use openreview_types::{
    EngineConfig, OpenreviewError, Paper, PaperId, PaperState, Result, UserId, constants,
};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::verdict::{Verdict, evaluate};

/// What a settlement did: who was paid how much, and what the submitter
/// got back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementOutcome {
    pub paper: PaperId,
    pub accepted: bool,
    pub payouts: Vec<(UserId, Decimal)>,
    /// Submitter refund; zero on acceptance.
    pub refund: Decimal,
}

/// Split `total` into `recipients` shares that sum to `total` exactly.
///
/// Each share is `total / recipients` rounded toward zero at
/// `TOKEN_SCALE`; the rounding remainder goes to the first recipient.
/// Recipient order is fixed by the caller (assignment order), so every
/// replica produces the identical share vector.
#[must_use]
pub fn distribute_evenly(total: Decimal, recipients: usize) -> Vec<Decimal> {
    if recipients == 0 {
        return Vec::new();
    }
    let count = Decimal::from(recipients);
    let share =
        (total / count).round_dp_with_strategy(constants::TOKEN_SCALE, RoundingStrategy::ToZero);
    let mut shares = vec![share; recipients];
    shares[0] += total - share * count;
    shares
}

/// Evaluate the paper and, if the vote has concluded, settle it.
///
/// Called at the end of every successful review submission. Returns
/// `None` while the verdict is still pending.
pub fn finalize_if_quorum(
    txn: &mut StateTxn<'_>,
    config: &EngineConfig,
    paper: &mut Paper,
) -> Result<Option<SettlementOutcome>> {
    match evaluate(paper) {
        Verdict::Pending => Ok(None),
        Verdict::Accepted => settle(txn, config, paper, true).map(Some),
        Verdict::Rejected => settle(txn, config, paper, false).map(Some),
    }
}

/// Execute a verdict: distribute the escrow, zero it, and finalize the
/// paper — all inside the caller's transaction.
///
/// On acceptance the full escrow is split among the reviewers who voted
/// valid. On rejection the penalty (capped at the escrow) is split among
/// **all** assigned reviewers regardless of vote, and the submitter is
/// refunded the rest.
///
/// # Errors
/// Returns `InvalidStateTransition` if the paper is already finalized —
/// the transition is checked and set in the same write-set, so settlement
/// runs exactly once per paper.
pub fn settle(
    txn: &mut StateTxn<'_>,
    config: &EngineConfig,
    paper: &mut Paper,
    accepted: bool,
) -> Result<SettlementOutcome> {
    paper.ensure_open("settle")?;

    let mut payouts: Vec<(UserId, Decimal)> = Vec::new();
    let mut refund = Decimal::ZERO;

    if accepted {
        let recipients: Vec<UserId> = paper
            .reviewer_ids
            .iter()
            .copied()
            .filter(|r| paper.reviews.get(r).is_some_and(|review| review.valid))
            .collect();
        if recipients.is_empty() {
            return Err(OpenreviewError::Internal(format!(
                "accepted paper {} has no valid-voting reviewer",
                paper.id
            )));
        }
        let shares = distribute_evenly(paper.escrow, recipients.len());
        for (id, share) in recipients.into_iter().zip(shares) {
            credit_user(txn, id, share)?;
            payouts.push((id, share));
        }
    } else {
        let penalty = config.rejection_penalty.min(paper.escrow);
        if paper.reviewer_ids.is_empty() {
            refund = paper.escrow;
        } else {
            let shares = distribute_evenly(penalty, paper.reviewer_ids.len());
            for (id, share) in paper.reviewer_ids.clone().into_iter().zip(shares) {
                credit_user(txn, id, share)?;
                payouts.push((id, share));
            }
            refund = paper.escrow - penalty;
        }
        credit_user(txn, paper.submitter, refund)?;
    }

    paper.escrow = Decimal::ZERO;
    paper.state = PaperState::Finalized { accepted };
    store_paper(txn, paper)?;

    tracing::info!(
        paper = %paper.id,
        accepted,
        payouts = payouts.len(),
        %refund,
        "paper settled"
    );

    Ok(SettlementOutcome {
        paper: paper.id,
        accepted,
        payouts,
        refund,
    })
}

fn credit_user(txn: &mut StateTxn<'_>, id: UserId, amount: Decimal) -> Result<()> {
    let mut user = load_user(txn, id)?;
    user.credit(amount);
    store_user(txn, &user)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use openreview_ledger::InMemoryLedger;
    use openreview_types::{Review, User};

    use super::*;

    const REVIEWERS: [&str; 3] = ["rev-a", "rev-b", "rev-c"];

    /// Ledger with the submitter and three reviewers, plus an open paper
    /// with escrow 3.0. Votes are supplied per reviewer.
    fn setup(votes: [bool; 3]) -> (InMemoryLedger, Paper) {
        let mut ledger = InMemoryLedger::new();
        let submitter = UserId::derive("submitter");
        let mut paper = Paper::new(
            PaperId::derive(0),
            "Settlement Scenarios",
            vec!["tokens".into()],
            submitter,
            vec![submitter],
            REVIEWERS.iter().map(|n| UserId::derive(n)).collect(),
            Decimal::new(3, 0),
            Utc::now(),
        );
        for (name, valid) in REVIEWERS.iter().zip(votes) {
            let id = UserId::derive(name);
            paper
                .reviews
                .insert(id, Review::new(id, "text", valid, Utc::now()));
        }

        let ws = {
            let mut txn = StateTxn::begin(&ledger, Utc::now());
            // Submitter already paid the fee: 100 - 3.
            let mut user = User::new("submitter", "pw", "s@x.org", vec![], Decimal::from(100));
            user.balance = Decimal::from(97);
            store_user(&mut txn, &user).unwrap();
            for name in REVIEWERS {
                let user = User::new(name, "pw", "r@x.org", vec![], Decimal::from(100));
                store_user(&mut txn, &user).unwrap();
            }
            store_paper(&mut txn, &paper).unwrap();
            txn.into_write_set()
        };
        ledger.commit(ws).unwrap();
        (ledger, paper)
    }

    fn balance_of(ledger: &InMemoryLedger, name: &str) -> Decimal {
        let mut txn = StateTxn::begin(ledger, Utc::now());
        load_user(&mut txn, UserId::derive(name)).unwrap().balance
    }

    #[test]
    fn distribute_evenly_exact_division() {
        let shares = distribute_evenly(Decimal::new(3, 0), 2);
        assert_eq!(shares, vec![Decimal::new(15, 1), Decimal::new(15, 1)]);
    }

    #[test]
    fn distribute_evenly_conserves_remainder() {
        let shares = distribute_evenly(Decimal::ONE, 3);
        assert_eq!(shares.len(), 3);
        let sum: Decimal = shares.iter().sum();
        assert_eq!(sum, Decimal::ONE);
        // Later shares are the rounded-down value; the first absorbs the
        // remainder.
        assert_eq!(shares[1], shares[2]);
        assert!(shares[0] >= shares[1]);
        assert!(shares[1] > Decimal::new(33, 2));
    }

    #[test]
    fn distribute_evenly_zero_recipients() {
        assert!(distribute_evenly(Decimal::ONE, 0).is_empty());
    }

    #[test]
    fn acceptance_splits_escrow_among_valid_voters() {
        // A and B vote valid, C votes invalid → accepted, A and B get 1.5
        // each, C gets nothing.
        let (mut ledger, mut paper) = setup([true, true, false]);
        let cfg = EngineConfig::default();

        let ws = {
            let mut txn = StateTxn::begin(&ledger, Utc::now());
            let outcome = finalize_if_quorum(&mut txn, &cfg, &mut paper)
                .unwrap()
                .unwrap();
            assert!(outcome.accepted);
            assert_eq!(outcome.refund, Decimal::ZERO);
            txn.into_write_set()
        };
        ledger.commit(ws).unwrap();

        assert_eq!(balance_of(&ledger, "rev-a"), Decimal::new(1015, 1));
        assert_eq!(balance_of(&ledger, "rev-b"), Decimal::new(1015, 1));
        assert_eq!(balance_of(&ledger, "rev-c"), Decimal::from(100));
        assert_eq!(balance_of(&ledger, "submitter"), Decimal::from(97));

        assert_eq!(paper.escrow, Decimal::ZERO);
        assert_eq!(paper.state, PaperState::Finalized { accepted: true });
    }

    #[test]
    fn rejection_splits_penalty_among_all_reviewers() {
        // A and C vote invalid, B votes valid → rejected; penalty 1.0 split
        // across all three, submitter refunded 3.0 - 1.0 = 2.0.
        let (mut ledger, mut paper) = setup([false, true, false]);
        let cfg = EngineConfig::default();

        let ws = {
            let mut txn = StateTxn::begin(&ledger, Utc::now());
            let outcome = finalize_if_quorum(&mut txn, &cfg, &mut paper)
                .unwrap()
                .unwrap();
            assert!(!outcome.accepted);
            assert_eq!(outcome.refund, Decimal::from(2));
            assert_eq!(outcome.payouts.len(), 3);

            let paid: Decimal = outcome.payouts.iter().map(|(_, s)| *s).sum();
            assert_eq!(paid, Decimal::ONE);
            txn.into_write_set()
        };
        ledger.commit(ws).unwrap();

        // Every reviewer got ≈ 1/3, vote notwithstanding.
        for name in REVIEWERS {
            let gain = balance_of(&ledger, name) - Decimal::from(100);
            assert!(gain > Decimal::new(33, 2), "{name} gain {gain}");
            assert!(gain < Decimal::new(34, 2), "{name} gain {gain}");
        }
        assert_eq!(balance_of(&ledger, "submitter"), Decimal::from(99));
        assert_eq!(paper.state, PaperState::Finalized { accepted: false });
    }

    #[test]
    fn settlement_runs_exactly_once() {
        let (ledger, mut paper) = setup([true, true, true]);
        let cfg = EngineConfig::default();

        let mut txn = StateTxn::begin(&ledger, Utc::now());
        settle(&mut txn, &cfg, &mut paper, true).unwrap();

        // A second settlement attempt in any transaction sees the
        // finalized state and refuses.
        let err = settle(&mut txn, &cfg, &mut paper, true).unwrap_err();
        assert!(matches!(
            err,
            OpenreviewError::InvalidStateTransition { .. }
        ));
    }

    #[test]
    fn pending_vote_does_not_settle() {
        let (ledger, mut paper) = setup([true, true, true]);
        paper.reviews.remove(&UserId::derive("rev-c"));
        let cfg = EngineConfig::default();

        let mut txn = StateTxn::begin(&ledger, Utc::now());
        let outcome = finalize_if_quorum(&mut txn, &cfg, &mut paper).unwrap();
        assert!(outcome.is_none());
        assert!(paper.is_under_review());
        assert_eq!(txn.write_count(), 0);
    }

    #[test]
    fn hold_settles_as_rejection_despite_unanimous_approval() {
        let (mut ledger, mut paper) = setup([true, true, true]);
        paper.editorial_hold = true;
        let cfg = EngineConfig::default();

        let ws = {
            let mut txn = StateTxn::begin(&ledger, Utc::now());
            let outcome = finalize_if_quorum(&mut txn, &cfg, &mut paper)
                .unwrap()
                .unwrap();
            assert!(!outcome.accepted);
            txn.into_write_set()
        };
        ledger.commit(ws).unwrap();
        assert_eq!(balance_of(&ledger, "submitter"), Decimal::from(99));
    }

    #[test]
    fn penalty_capped_at_escrow() {
        let (ledger, mut paper) = setup([false, false, false]);
        paper.escrow = Decimal::new(5, 1); // 0.5 escrowed, penalty config 1.0
        let cfg = EngineConfig::default();

        let mut txn = StateTxn::begin(&ledger, Utc::now());
        let outcome = settle(&mut txn, &cfg, &mut paper, false).unwrap();
        assert_eq!(outcome.refund, Decimal::ZERO);
        let paid: Decimal = outcome.payouts.iter().map(|(_, s)| *s).sum();
        assert_eq!(paid, Decimal::new(5, 1));
    }
}
