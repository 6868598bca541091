//! The invocation surface.
//!
//! Every mutating operation is exposed as a named function taking a flat
//! list of string arguments — the shape the replication platform delivers
//! transactions in. Multi-valued fields (author lists, keywords, research
//! areas) are `/`-separated; amounts and scores are decimal strings.
//!
//! An invocation returns either the updated record serialized as JSON, or
//! a typed [`OpenreviewError`]. On failure the transaction is dropped
//! before commit, so no partial writes are ever applied.

use chrono::{DateTime, Utc};
use openreview_ledger::{InMemoryLedger, StateTxn};
use openreview_matchcore::record_similarity;
use openreview_settlement::{audit_supply, set_editorial_hold};
use openreview_types::{
    EngineConfig, OpenreviewError, RebuttalId, Result, UserId, constants,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{queries, registry, review, submission};

/// The deterministic state-transition engine, bundling the ledger and the
/// economy configuration.
///
/// The hosting platform serializes invocations into one global order;
/// `invoke` applies a single invocation atomically. `tx_time` is the
/// platform-assigned transaction timestamp shared by all replicas.
pub struct ReviewEngine {
    ledger: InMemoryLedger,
    config: EngineConfig,
}

impl ReviewEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            ledger: InMemoryLedger::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }

    /// Apply one named operation with flat string arguments.
    ///
    /// # Errors
    /// Any [`OpenreviewError`]; the ledger is untouched on failure.
    pub fn invoke(
        &mut self,
        tx_time: DateTime<Utc>,
        operation: &str,
        args: &[&str],
    ) -> Result<Vec<u8>> {
        let mut txn = StateTxn::begin(&self.ledger, tx_time);
        let payload = dispatch(&mut txn, &self.config, operation, args)?;
        let write_set = txn.into_write_set();
        self.ledger.commit(write_set)?;
        Ok(payload)
    }
}

impl Default for ReviewEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::too_many_lines)]
fn dispatch(
    txn: &mut StateTxn<'_>,
    config: &EngineConfig,
    operation: &str,
    args: &[&str],
) -> Result<Vec<u8>> {
    match operation {
        "RegisterUser" => {
            let [name, credential, email, areas] = expect_args(operation, args)?;
            let user =
                registry::register_user(txn, config, name, credential, email, split_list(areas))?;
            to_payload(&user)
        }
        "ValidateUser" => {
            let [name, credential] = expect_args(operation, args)?;
            to_payload(&registry::validate_user(txn, name, credential)?)
        }
        "UpdateProfile" => {
            let [name, old_credential, new_credential, email, areas] =
                expect_args(operation, args)?;
            let user = registry::update_profile(
                txn,
                name,
                old_credential,
                new_credential,
                email,
                split_list(areas),
            )?;
            to_payload(&user)
        }
        "Transfer" => {
            let [from, to, amount] = expect_args(operation, args)?;
            let (from, to) = registry::transfer(txn, from, to, parse_decimal("amount", amount)?)?;
            to_payload(&(from, to))
        }
        "AddSimilarityPair" => {
            let [keyword, area, score] = expect_args(operation, args)?;
            let pair = record_similarity(txn, keyword, area, parse_decimal("score", score)?)?;
            to_payload(&pair)
        }
        "SubmitPaper" => {
            let [submitter, title, authors, keywords] = expect_args(operation, args)?;
            let paper = submission::submit_paper(
                txn,
                config,
                submitter,
                title,
                &split_list(authors),
                split_list(keywords),
            )?;
            to_payload(&paper)
        }
        "UpdateMetadata" => {
            let [title, new_title, added_authors] = expect_args(operation, args)?;
            let paper =
                submission::update_metadata(txn, title, new_title, &split_list(added_authors))?;
            to_payload(&paper)
        }
        "AddReview" => {
            let [title, reviewer, content, valid] = expect_args(operation, args)?;
            let (paper, _outcome) = review::add_review(
                txn,
                config,
                title,
                reviewer,
                content,
                parse_bool("valid", valid)?,
            )?;
            to_payload(&paper)
        }
        "AddRebuttal" => {
            let [title, author, reviewer_id, question] = expect_args(operation, args)?;
            let rebuttal =
                review::add_rebuttal(txn, title, author, parse_user_id(reviewer_id)?, question)?;
            to_payload(&rebuttal)
        }
        "AddReply" => {
            let [title, reviewer, rebuttal_id, reply] = expect_args(operation, args)?;
            let rebuttal = review::add_reply(
                txn,
                title,
                reviewer,
                parse_rebuttal_id(rebuttal_id)?,
                reply,
            )?;
            to_payload(&rebuttal)
        }
        "SetEditorialHold" => {
            let [title, held] = expect_args(operation, args)?;
            let paper = set_editorial_hold(txn, title, parse_bool("held", held)?)?;
            to_payload(&paper)
        }
        "GetUserInfo" => {
            let [name] = expect_args(operation, args)?;
            to_payload(&queries::user_info(txn, name)?)
        }
        "GetPaperInfo" => {
            let [title] = expect_args(operation, args)?;
            to_payload(&queries::paper_info(txn, title)?)
        }
        "AuditSupply" => {
            expect_args::<0>(operation, args)?;
            to_payload(&audit_supply(txn)?)
        }
        other => Err(OpenreviewError::UnknownOperation(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

fn expect_args<'a, const N: usize>(operation: &str, args: &[&'a str]) -> Result<[&'a str; N]> {
    <[&'a str; N]>::try_from(args).map_err(|_| OpenreviewError::InvalidArgument {
        reason: format!("{operation} takes {N} arguments, got {}", args.len()),
    })
}

/// Split a `/`-separated list argument, trimming blanks.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(constants::LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal> {
    raw.trim()
        .parse()
        .map_err(|_| OpenreviewError::InvalidArgument {
            reason: format!("{field} is not a decimal number: {raw}"),
        })
}

fn parse_bool(field: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(OpenreviewError::InvalidArgument {
            reason: format!("{field} must be true or false: {raw}"),
        }),
    }
}

fn parse_user_id(raw: &str) -> Result<UserId> {
    raw.trim()
        .parse()
        .map_err(|_| OpenreviewError::InvalidUserId {
            raw: raw.to_string(),
        })
}

fn parse_rebuttal_id(raw: &str) -> Result<RebuttalId> {
    raw.trim()
        .parse()
        .map_err(|_| OpenreviewError::InvalidArgument {
            reason: format!("rebuttal id is not an integer: {raw}"),
        })
}

fn to_payload<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| OpenreviewError::Serialization(e.to_string()))
}
