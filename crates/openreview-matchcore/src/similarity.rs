//! Similarity table access and score aggregation.

use openreview_ledger::{StateTxn, keys};
use openreview_types::{Result, SimilarityPair};
use rust_decimal::Decimal;

/// Seed or overwrite one (keyword, area) similarity score.
pub fn record_similarity(
    txn: &mut StateTxn<'_>,
    keyword: &str,
    area: &str,
    score: Decimal,
) -> Result<SimilarityPair> {
    let pair = SimilarityPair::new(keyword, area, score);
    txn.put(&keys::similarity_key(keyword, area), &pair)?;
    Ok(pair)
}

/// Score for one (keyword, area) pair; pairs absent from the table score
/// zero.
pub fn pair_score(txn: &mut StateTxn<'_>, keyword: &str, area: &str) -> Result<Decimal> {
    Ok(txn
        .get::<SimilarityPair>(&keys::similarity_key(keyword, area))?
        .map_or(Decimal::ZERO, |p| p.score))
}

/// Aggregate topical fit of one candidate against one paper: the maximum
/// pair score over the keyword × research-area cross product.
pub fn aggregate_score(
    txn: &mut StateTxn<'_>,
    keywords: &[String],
    research_areas: &[String],
) -> Result<Decimal> {
    let mut best = Decimal::ZERO;
    for keyword in keywords {
        for area in research_areas {
            best = best.max(pair_score(txn, keyword, area)?);
        }
    }
    Ok(best)
}
