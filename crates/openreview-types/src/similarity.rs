//! Precomputed keyword/research-area similarity scores.
//!
//! One record per (keyword, area) pair, keyed by their concatenation.
//! The table is seeded by an admin operation and read-only during matching.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger key fragment for a similarity pair: `keyword+"+"+area`.
#[must_use]
pub fn pair_key(keyword: &str, area: &str) -> String {
    format!("{keyword}+{area}")
}

/// Relevance score between one paper keyword and one reviewer research
/// area. Pairs absent from the table score zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub pair: String,
    pub score: Decimal,
}

impl SimilarityPair {
    #[must_use]
    pub fn new(keyword: &str, area: &str, score: Decimal) -> Self {
        Self {
            pair: pair_key(keyword, area),
            score,
        }
    }
}
