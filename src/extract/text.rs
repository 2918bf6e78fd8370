//! Literal text containment.
//!
//! The only extractor whose required value is caller-supplied: a
//! case-insensitive substring search for a literal the operator asked for.

use super::Detection;

/// Detects a caller-supplied literal in the content, case-insensitively.
#[must_use]
pub fn detect_text(content: &str, needle: &str) -> Detection {
    let haystack = content.to_lowercase();
    match haystack.find(&needle.to_lowercase()) {
        Some(index) => Detection::hit(content, index),
        None => Detection::miss(),
    }
}

#[cfg(test)]
mod tests {
    use super::detect_text;

    #[test]
    fn finds_literal_ignoring_case() {
        let content = "<p>This item is IN STOCK and ships today.</p>";
        let detection = detect_text(content, "in stock");
        assert!(detection.found);
        assert!(detection.evidence.unwrap().contains("IN STOCK"));
    }

    #[test]
    fn misses_absent_literal() {
        let detection = detect_text("<p>Sold out.</p>", "in stock");
        assert!(!detection.found);
        assert!(detection.evidence.is_none());
    }

    #[test]
    fn empty_needle_matches_at_start() {
        assert!(detect_text("anything", "").found);
    }
}
