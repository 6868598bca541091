//! Typed accessors for user and paper records.
//!
//! Callers resolve names through the [`Directory`] / [`TitleIndex`] first;
//! by the time an ID-keyed record is loaded here, its absence means the
//! indexes and the record store disagree, which is corruption rather than
//! caller error.
//!
//! [`Directory`]: crate::Directory
//! [`TitleIndex`]: crate::TitleIndex

use openreview_types::{OpenreviewError, Paper, PaperId, Result, User, UserId};

use crate::{keys, txn::StateTxn};

/// Load a user record by ID.
///
/// # Errors
/// Returns `Internal` if the record is missing — the directory resolved
/// the ID, so the record must exist.
pub fn load_user(txn: &mut StateTxn<'_>, id: UserId) -> Result<User> {
    txn.get(&keys::user_key(id))?
        .ok_or_else(|| OpenreviewError::Internal(format!("missing user record for id {id}")))
}

pub fn store_user(txn: &mut StateTxn<'_>, user: &User) -> Result<()> {
    txn.put(&keys::user_key(user.id), user)
}

/// Load a paper record by ID.
///
/// # Errors
/// Returns `Internal` if the record is missing — the title index resolved
/// the ID, so the record must exist.
pub fn load_paper(txn: &mut StateTxn<'_>, id: PaperId) -> Result<Paper> {
    txn.get(&keys::paper_key(id))?
        .ok_or_else(|| OpenreviewError::Internal(format!("missing paper record for id {id}")))
}

pub fn store_paper(txn: &mut StateTxn<'_>, paper: &Paper) -> Result<()> {
    txn.put(&keys::paper_key(paper.id), paper)
}
