//! Editorial hold — the moderator's reject/un-reject override.

use openreview_ledger::{StateTxn, TitleIndex, load_paper, store_paper};
use openreview_types::{Paper, Result};

/// Flip a paper's editorial hold flag.
///
/// While the paper is under review the flag is stored and consulted when
/// finality fires (a held paper settles as rejected whatever the votes
/// say). Once the paper is finalized the call is a no-op and the current
/// record is returned unchanged.
///
/// # Errors
/// Returns `PaperNotFound` for unknown titles.
pub fn set_editorial_hold(txn: &mut StateTxn<'_>, title: &str, held: bool) -> Result<Paper> {
    let index = TitleIndex::load(txn)?;
    let id = index.resolve(title)?;
    let mut paper = load_paper(txn, id)?;

    if paper.state.is_terminal() {
        tracing::debug!(paper = %paper.id, "editorial hold ignored on finalized paper");
        return Ok(paper);
    }

    paper.editorial_hold = held;
    store_paper(txn, &paper)?;
    tracing::info!(paper = %paper.id, held, "editorial hold updated");
    Ok(paper)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use openreview_ledger::InMemoryLedger;
    use openreview_types::{OpenreviewError, PaperId, PaperState, UserId};
    use rust_decimal::Decimal;

    use super::*;

    fn ledger_with_paper(state: PaperState) -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();
        let submitter = UserId::derive("submitter");
        let mut paper = Paper::new(
            PaperId::derive(0),
            "Held Paper",
            vec![],
            submitter,
            vec![submitter],
            vec![UserId::derive("rev")],
            if state.is_terminal() {
                Decimal::ZERO
            } else {
                Decimal::new(3, 0)
            },
            Utc::now(),
        );
        paper.state = state;

        let ws = {
            let mut txn = StateTxn::begin(&ledger, Utc::now());
            let mut index = TitleIndex::default();
            index.claim("Held Paper").unwrap();
            index.store(&mut txn).unwrap();
            store_paper(&mut txn, &paper).unwrap();
            txn.into_write_set()
        };
        ledger.commit(ws).unwrap();
        ledger
    }

    #[test]
    fn hold_set_and_cleared_while_open() {
        let mut ledger = ledger_with_paper(PaperState::UnderReview);

        let ws = {
            let mut txn = StateTxn::begin(&ledger, Utc::now());
            let paper = set_editorial_hold(&mut txn, "Held Paper", true).unwrap();
            assert!(paper.editorial_hold);
            txn.into_write_set()
        };
        ledger.commit(ws).unwrap();

        let mut txn = StateTxn::begin(&ledger, Utc::now());
        let paper = set_editorial_hold(&mut txn, "Held Paper", false).unwrap();
        assert!(!paper.editorial_hold);
    }

    #[test]
    fn hold_is_noop_once_finalized() {
        let ledger = ledger_with_paper(PaperState::Finalized { accepted: true });

        let mut txn = StateTxn::begin(&ledger, Utc::now());
        let paper = set_editorial_hold(&mut txn, "Held Paper", true).unwrap();
        assert!(!paper.editorial_hold);
        assert_eq!(txn.write_count(), 0);
    }

    #[test]
    fn unknown_title_fails() {
        let ledger = ledger_with_paper(PaperState::UnderReview);
        let mut txn = StateTxn::begin(&ledger, Utc::now());
        let err = set_editorial_hold(&mut txn, "No Such Paper", true).unwrap_err();
        assert!(matches!(err, OpenreviewError::PaperNotFound { .. }));
    }
}
