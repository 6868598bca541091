//! Quorum verdict computation.

use openreview_types::Paper;

/// Outcome of evaluating a paper's collected reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not every assigned reviewer has voted yet.
    Pending,
    Accepted,
    Rejected,
}

/// Decide a paper's fate from its current reviews. Pure: no ledger access,
/// no mutation.
///
/// Rules, in order:
/// 1. Until all of `reviewer_ids` have filed a review, the verdict is
///    `Pending` — the editorial hold included; un-rejecting must stay
///    possible while votes are outstanding.
/// 2. With quorum complete, an editorial hold forces `Rejected` whatever
///    the votes say.
/// 3. Otherwise strict majority decides. An exact even split reaches
///    neither strict majority and is `Rejected` rather than left pending
///    forever with the escrow locked.
#[must_use]
pub fn evaluate(paper: &Paper) -> Verdict {
    let assigned = paper.reviewer_ids.len();
    let (valid, invalid) = paper.vote_counts();
    if valid + invalid < assigned {
        return Verdict::Pending;
    }
    if paper.editorial_hold {
        return Verdict::Rejected;
    }
    if valid * 2 > assigned {
        Verdict::Accepted
    } else {
        // Covers both a strict invalid majority and an exact even split.
        debug_assert!(invalid * 2 >= assigned);
        Verdict::Rejected
    }
}
