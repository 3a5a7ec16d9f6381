//! Deterministic digest keys for classification cache entries.

use xxhash_rust::xxh64::Xxh64;

/// Digest a (summary text, keywords) pair into a stable cache key.
///
/// Both fields are trimmed and lowercased first, so cosmetic differences in
/// the feed (casing, stray whitespace) hit the same entry.
pub fn classification_key(text: &str, keywords: &str) -> u64 {
    let mut hasher = Xxh64::new(0);
    hasher.update(text.trim().to_lowercase().as_bytes());
    hasher.update(b"\n");
    hasher.update(keywords.trim().to_lowercase().as_bytes());
    hasher.digest()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(
            classification_key("marco civil", "internet"),
            classification_key("marco civil", "internet"),
        );
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(
            classification_key("  Marco Civil  ", "Internet"),
            classification_key("marco civil", "internet"),
        );
    }

    #[test]
    fn keywords_participate_in_key() {
        assert_ne!(
            classification_key("marco civil", "internet"),
            classification_key("marco civil", ""),
        );
    }

    #[test]
    fn field_boundary_is_unambiguous() {
        // "ab" + "c" must not collide with "a" + "bc".
        assert_ne!(classification_key("ab", "c"), classification_key("a", "bc"));
    }
}
