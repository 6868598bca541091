//! Top-k reviewer selection.

use std::collections::BTreeSet;

use openreview_ledger::{Directory, StateTxn, load_user};
use openreview_types::{OpenreviewError, Result, UserId};
use rust_decimal::Decimal;

use crate::similarity::aggregate_score;

struct CandidateScore {
    id: UserId,
    score: Decimal,
}

/// Select the top `k` reviewers for a paper, by aggregate topical fit.
///
/// Candidates are every registered user outside the paper's author set,
/// enumerated in directory (name) order. They are ranked by score
/// descending with ties broken by user ID ascending — a fixed secondary
/// key, so independent replicas derive the identical assignment from the
/// same snapshot.
///
/// # Errors
/// Returns `InsufficientReviewers` if fewer than `k` eligible candidates
/// exist.
pub fn select_reviewers(
    txn: &mut StateTxn<'_>,
    keywords: &[String],
    authors: &BTreeSet<UserId>,
    k: usize,
) -> Result<Vec<UserId>> {
    let directory = Directory::load(txn)?;

    let mut candidates: Vec<CandidateScore> = Vec::new();
    for id in directory.ids_by_name().collect::<Vec<_>>() {
        if authors.contains(&id) {
            continue;
        }
        let user = load_user(txn, id)?;
        let score = aggregate_score(txn, keywords, &user.research_areas)?;
        candidates.push(CandidateScore { id, score });
    }

    if candidates.len() < k {
        return Err(OpenreviewError::InsufficientReviewers {
            needed: k,
            available: candidates.len(),
        });
    }

    candidates.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));

    let selected: Vec<UserId> = candidates.into_iter().take(k).map(|c| c.id).collect();
    tracing::debug!(k, reviewers = ?selected, "reviewers selected");
    Ok(selected)
}
