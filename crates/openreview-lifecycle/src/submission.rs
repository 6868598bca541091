//! Paper submission and metadata updates.

use std::collections::BTreeSet;

use openreview_ledger::{Directory, StateTxn, TitleIndex, load_paper, load_user, store_paper, store_user};
use openreview_matchcore::select_reviewers;
use openreview_types::{EngineConfig, OpenreviewError, Paper, Result, UserId};

/// Submit a paper: claim the title, lock the fee into escrow, match
/// reviewers, and update every author's and reviewer's worklist — one
/// atomic write-set.
///
/// The submitter is always an author: it is prepended to the resolved
/// author list when the caller omits it.
///
/// # Errors
/// In precedence order: `UserNotFound` (submitter), `DuplicateTitle`,
/// `InsufficientBalance`, `UserNotFound` (co-authors),
/// `InsufficientReviewers`.
pub fn submit_paper(
    txn: &mut StateTxn<'_>,
    config: &EngineConfig,
    submitter_name: &str,
    title: &str,
    author_names: &[String],
    keywords: Vec<String>,
) -> Result<Paper> {
    let directory = Directory::load(txn)?;
    let submitter_id = directory.resolve(submitter_name)?;

    let mut index = TitleIndex::load(txn)?;
    let paper_id = index.claim(title)?;
    index.store(txn)?;

    let submitter = load_user(txn, submitter_id)?;
    if submitter.balance < config.submission_fee {
        return Err(OpenreviewError::InsufficientBalance {
            needed: config.submission_fee,
            available: submitter.balance,
        });
    }

    let mut author_ids: Vec<UserId> = vec![submitter_id];
    for name in author_names {
        let id = directory.resolve(name)?;
        if !author_ids.contains(&id) {
            author_ids.push(id);
        }
    }

    let keywords = dedup_ordered(keywords);
    let author_set: BTreeSet<UserId> = author_ids.iter().copied().collect();
    let reviewer_ids = select_reviewers(txn, &keywords, &author_set, config.reviewers_per_paper)?;

    let paper = Paper::new(
        paper_id,
        title,
        keywords,
        submitter_id,
        author_ids.clone(),
        reviewer_ids.clone(),
        config.submission_fee,
        txn.tx_time(),
    );

    for id in &author_ids {
        let mut author = load_user(txn, *id)?;
        if *id == submitter_id {
            author.debit(config.submission_fee)?;
        }
        author.committed_papers.push(paper_id);
        store_user(txn, &author)?;
    }

    for id in &reviewer_ids {
        let mut reviewer = load_user(txn, *id)?;
        reviewer.assign_paper(paper_id);
        store_user(txn, &reviewer)?;
    }

    store_paper(txn, &paper)?;
    tracing::info!(
        paper = %paper_id,
        title,
        authors = author_ids.len(),
        reviewers = reviewer_ids.len(),
        "paper submitted"
    );
    Ok(paper)
}

/// Rename a paper and/or append co-authors. Matching is not re-run; the
/// reviewer set stays fixed.
///
/// # Errors
/// `PaperNotFound` / `DuplicateTitle` from the rename;
/// `InvalidStateTransition` on a finalized paper; `UserNotFound` per
/// unresolved co-author name.
pub fn update_metadata(
    txn: &mut StateTxn<'_>,
    title: &str,
    new_title: &str,
    added_author_names: &[String],
) -> Result<Paper> {
    let directory = Directory::load(txn)?;
    let mut index = TitleIndex::load(txn)?;
    let paper_id = index.rename(title, new_title)?;

    let mut paper = load_paper(txn, paper_id)?;
    paper.ensure_open("update metadata")?;

    index.store(txn)?;
    paper.title = new_title.to_string();

    for name in added_author_names {
        let id = directory.resolve(name)?;
        if paper.author_ids.contains(&id) {
            continue;
        }
        paper.author_ids.push(id);
        let mut author = load_user(txn, id)?;
        author.committed_papers.push(paper_id);
        store_user(txn, &author)?;
    }

    store_paper(txn, &paper)?;
    tracing::info!(paper = %paper_id, title = new_title, "paper metadata updated");
    Ok(paper)
}

fn dedup_ordered(tags: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tags.into_iter().filter(|t| seen.insert(t.clone())).collect()
}
