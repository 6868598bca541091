//! The ledger key space.
//!
//! Keys used by the core: one record per user ID, one per paper ID, one
//! record per similarity pair, plus three singleton records (directory,
//! title index, token supply).

use openreview_types::{PaperId, UserId, similarity};

/// Singleton record: name → user ID map.
pub const DIRECTORY_KEY: &str = "directory";

/// Singleton record: active title → paper ID map + submission sequence.
pub const TITLE_INDEX_KEY: &str = "titles";

/// Singleton record: total tokens minted.
pub const SUPPLY_KEY: &str = "supply";

#[must_use]
pub fn user_key(id: UserId) -> String {
    format!("user/{id}")
}

#[must_use]
pub fn paper_key(id: PaperId) -> String {
    format!("paper/{id}")
}

#[must_use]
pub fn similarity_key(keyword: &str, area: &str) -> String {
    format!("sim/{}", similarity::pair_key(keyword, area))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced() {
        let uid = UserId::derive("alice");
        assert_eq!(user_key(uid), format!("user/{uid}"));

        let pid = PaperId::derive(0);
        assert_eq!(paper_key(pid), format!("paper/{pid}"));

        assert_eq!(similarity_key("nlp", "linguistics"), "sim/nlp+linguistics");
    }

    #[test]
    fn singletons_do_not_collide_with_namespaces() {
        assert!(!DIRECTORY_KEY.contains('/'));
        assert!(!TITLE_INDEX_KEY.contains('/'));
        assert!(!SUPPLY_KEY.contains('/'));
    }
}
