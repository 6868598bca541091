//! Read-only views: profile and paper summaries with IDs resolved to
//! human-readable names and titles.

use std::collections::BTreeMap;

use openreview_ledger::{Directory, StateTxn, TitleIndex, load_paper, load_user};
use openreview_types::{PaperId, PaperState, Result, Review, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's profile and worklists, with paper IDs resolved to titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    pub balance: Decimal,
    pub research_areas: Vec<String>,
    pub committed_papers: Vec<String>,
    pub assigned_unreviewed: Vec<String>,
    pub assigned_reviewed: Vec<String>,
}

/// A paper summary with author IDs resolved to names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperInfo {
    pub title: String,
    pub keywords: Vec<String>,
    pub authors: Vec<String>,
    pub reviewer_count: usize,
    pub reviews: BTreeMap<UserId, Review>,
    pub escrow: Decimal,
    pub state: PaperState,
    pub editorial_hold: bool,
}

/// Look up a user by name and resolve their worklists to titles.
///
/// # Errors
/// Returns `UserNotFound` for unregistered names.
pub fn user_info(txn: &mut StateTxn<'_>, name: &str) -> Result<UserInfo> {
    let directory = Directory::load(txn)?;
    let user = load_user(txn, directory.resolve(name)?)?;

    Ok(UserInfo {
        name: user.name,
        email: user.email,
        balance: user.balance,
        research_areas: user.research_areas,
        committed_papers: titles_of(txn, &user.committed_papers)?,
        assigned_unreviewed: titles_of(txn, &user.assigned_unreviewed)?,
        assigned_reviewed: titles_of(txn, &user.assigned_reviewed)?,
    })
}

/// Look up a paper by title and resolve its author names.
///
/// # Errors
/// Returns `PaperNotFound` for unknown titles.
pub fn paper_info(txn: &mut StateTxn<'_>, title: &str) -> Result<PaperInfo> {
    let index = TitleIndex::load(txn)?;
    let paper = load_paper(txn, index.resolve(title)?)?;

    let mut authors = Vec::with_capacity(paper.author_ids.len());
    for id in &paper.author_ids {
        authors.push(name_of(txn, *id)?);
    }

    Ok(PaperInfo {
        title: paper.title,
        keywords: paper.keywords,
        authors,
        reviewer_count: paper.reviewer_ids.len(),
        reviews: paper.reviews,
        escrow: paper.escrow,
        state: paper.state,
        editorial_hold: paper.editorial_hold,
    })
}

fn titles_of(txn: &mut StateTxn<'_>, ids: &[PaperId]) -> Result<Vec<String>> {
    let mut titles = Vec::with_capacity(ids.len());
    for id in ids {
        titles.push(load_paper(txn, *id)?.title);
    }
    Ok(titles)
}

fn name_of(txn: &mut StateTxn<'_>, id: UserId) -> Result<String> {
    Ok(load_user(txn, id)?.name)
}
