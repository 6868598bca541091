//! Review submission and the rebuttal/reply exchange.

use openreview_ledger::{Directory, StateTxn, TitleIndex, load_paper, load_user, store_paper, store_user};
use openreview_settlement::{SettlementOutcome, finalize_if_quorum};
use openreview_types::{
    EngineConfig, OpenreviewError, Paper, Rebuttal, RebuttalId, Result, Review, UserId,
};

/// File a review and its validity vote.
///
/// Moves the paper from the reviewer's unreviewed worklist to the
/// reviewed one, then evaluates finality: if this was the last assigned
/// review, settlement runs inside the same transaction.
///
/// # Errors
/// `PaperNotFound`, `InvalidStateTransition` (finalized paper),
/// `UserNotFound`, `NotAssigned`, `AlreadyReviewed`.
pub fn add_review(
    txn: &mut StateTxn<'_>,
    config: &EngineConfig,
    title: &str,
    reviewer_name: &str,
    content: &str,
    valid: bool,
) -> Result<(Paper, Option<SettlementOutcome>)> {
    let directory = Directory::load(txn)?;
    let index = TitleIndex::load(txn)?;
    let paper_id = index.resolve(title)?;
    let mut paper = load_paper(txn, paper_id)?;
    paper.ensure_open("add review")?;

    let reviewer_id = directory.resolve(reviewer_name)?;
    if !paper.is_reviewer(reviewer_id) {
        return Err(OpenreviewError::NotAssigned {
            reviewer: reviewer_id,
            paper: paper_id,
        });
    }
    if paper.reviews.contains_key(&reviewer_id) {
        return Err(OpenreviewError::AlreadyReviewed {
            reviewer: reviewer_id,
            paper: paper_id,
        });
    }

    paper.reviews.insert(
        reviewer_id,
        Review::new(reviewer_id, content, valid, txn.tx_time()),
    );

    let mut reviewer = load_user(txn, reviewer_id)?;
    reviewer.mark_reviewed(paper_id);
    store_user(txn, &reviewer)?;
    store_paper(txn, &paper)?;

    // A settlement overwrites the paper record staged above, within the
    // same transaction.
    let outcome = finalize_if_quorum(txn, config, &mut paper)?;

    tracing::info!(
        paper = %paper_id,
        reviewer = %reviewer_id,
        valid,
        settled = outcome.is_some(),
        "review filed"
    );
    Ok((paper, outcome))
}

/// Open a rebuttal: an author question attached to one review.
///
/// The rebuttal ID comes from the review's monotonic counter; the
/// exchange is unordered, unlimited, and never affects the verdict.
///
/// # Errors
/// `PaperNotFound`, `InvalidStateTransition` (finalized paper),
/// `UserNotFound`, `ReviewNotFound` if the reviewer has not reviewed yet.
pub fn add_rebuttal(
    txn: &mut StateTxn<'_>,
    title: &str,
    author_name: &str,
    reviewer_id: UserId,
    question: &str,
) -> Result<Rebuttal> {
    let directory = Directory::load(txn)?;
    let author_id = directory.resolve(author_name)?;

    let index = TitleIndex::load(txn)?;
    let paper_id = index.resolve(title)?;
    let mut paper = load_paper(txn, paper_id)?;
    paper.ensure_open("add rebuttal")?;

    let review =
        paper
            .reviews
            .get_mut(&reviewer_id)
            .ok_or(OpenreviewError::ReviewNotFound {
                reviewer: reviewer_id,
                paper: paper_id,
            })?;
    let rebuttal_id = review.open_rebuttal(author_id, question);
    let rebuttal = review.rebuttals[&rebuttal_id].clone();

    store_paper(txn, &paper)?;
    tracing::debug!(paper = %paper_id, reviewer = %reviewer_id, rebuttal_id, "rebuttal opened");
    Ok(rebuttal)
}

/// Answer a rebuttal. A rebuttal transitions to replied exactly once.
///
/// # Errors
/// `RebuttalNotFound` if the ID is unknown *or* the rebuttal was already
/// answered; `ReviewNotFound` if this reviewer has no review here.
pub fn add_reply(
    txn: &mut StateTxn<'_>,
    title: &str,
    reviewer_name: &str,
    rebuttal_id: RebuttalId,
    reply: &str,
) -> Result<Rebuttal> {
    let directory = Directory::load(txn)?;
    let reviewer_id = directory.resolve(reviewer_name)?;

    let index = TitleIndex::load(txn)?;
    let paper_id = index.resolve(title)?;
    let mut paper = load_paper(txn, paper_id)?;
    paper.ensure_open("add reply")?;

    let review =
        paper
            .reviews
            .get_mut(&reviewer_id)
            .ok_or(OpenreviewError::ReviewNotFound {
                reviewer: reviewer_id,
                paper: paper_id,
            })?;
    let rebuttal =
        review
            .open_rebuttal_mut(rebuttal_id)
            .ok_or(OpenreviewError::RebuttalNotFound {
                rebuttal: rebuttal_id,
                paper: paper_id,
            })?;

    rebuttal.reply = reply.to_string();
    rebuttal.replied = true;
    let answered = rebuttal.clone();

    store_paper(txn, &paper)?;
    tracing::debug!(paper = %paper_id, reviewer = %reviewer_id, rebuttal_id, "rebuttal answered");
    Ok(answered)
}
