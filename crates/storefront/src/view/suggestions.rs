//! Search-as-you-type suggestions from a fixed vocabulary.

/// Maximum number of suggestions returned for one query.
pub const MAX_SUGGESTIONS: usize = 6;

const VOCABULARY: &[&str] = &[
    "laptop",
    "phone",
    "headphones",
    "watch",
    "tablet",
    "camera",
    "speaker",
    "keyboard",
    "mouse",
    "monitor",
    "charger",
    "case",
    "electronics",
    "jewelry",
    "clothing",
    "mens",
    "womens",
    "shirt",
    "dress",
    "jacket",
    "shoes",
    "bag",
];

/// Vocabulary terms containing `query`, case-insensitively.
///
/// A blank query yields nothing.
#[must_use]
pub fn suggestions(query: &str) -> Vec<&'static str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    VOCABULARY
        .iter()
        .copied()
        .filter(|term| term.contains(&query))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_has_no_suggestions() {
        assert!(suggestions("").is_empty());
        assert!(suggestions("   ").is_empty());
    }

    #[test]
    fn test_matches_substring_ignoring_case() {
        assert_eq!(suggestions("PHONE"), vec!["phone", "headphones"]);
        assert_eq!(suggestions("men"), vec!["mens", "womens"]);
    }

    #[test]
    fn test_caps_result_count() {
        // "e" appears in far more than six terms.
        let results = suggestions("e");
        assert_eq!(results.len(), MAX_SUGGESTIONS);
        assert_eq!(results.first(), Some(&"phone"));
    }
}
