//! Signal extractors.
//!
//! Pure detectors that pull structured signals (price, purchasability,
//! literal text) out of unstructured page content. Extractors never fail on
//! malformed input; the worst case is a non-match. A positive detection
//! carries a short evidence excerpt centered on the match.

mod price;
mod purchasable;
mod text;

pub use price::detect_price;
pub use purchasable::detect_add_to_cart;
pub use text::detect_text;

/// Half-width, in bytes, of the evidence excerpt around a match.
const EVIDENCE_RADIUS: usize = 160;

/// Result of running one extractor over page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Whether the signal was found.
    pub found: bool,
    /// Excerpt of the content justifying a positive detection.
    pub evidence: Option<String>,
}

impl Detection {
    /// A positive detection with evidence centered on `index`.
    fn hit(content: &str, index: usize) -> Self {
        Self { found: true, evidence: Some(snippet(content, index)) }
    }

    /// A negative detection.
    #[must_use]
    pub(crate) fn miss() -> Self {
        Self { found: false, evidence: None }
    }
}

/// Whitespace-collapsed excerpt of `content` around byte `index`.
///
/// Bounds are clamped to the content and nudged onto `char` boundaries so a
/// match near a multi-byte character never slices mid-code-point.
fn snippet(content: &str, index: usize) -> String {
    let index = index.min(content.len());
    let mut start = index.saturating_sub(EVIDENCE_RADIUS);
    let mut end = (index + EVIDENCE_RADIUS).min(content.len());
    while !content.is_char_boundary(start) {
        start -= 1;
    }
    while !content.is_char_boundary(end) {
        end += 1;
    }
    content[start..end].split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::snippet;

    #[test]
    fn snippet_collapses_whitespace() {
        let content = "a\n\n  b\t\tc   d";
        assert_eq!(snippet(content, 0), "a b c d");
    }

    #[test]
    fn snippet_clamps_at_both_edges() {
        let content = "short";
        assert_eq!(snippet(content, 2), "short");
        assert_eq!(snippet(content, 999), "short");
    }

    #[test]
    fn snippet_is_bounded_around_the_match() {
        let content = format!("{}PRICE{}", "x".repeat(500), "y".repeat(500));
        let excerpt = snippet(&content, 500);
        assert!(excerpt.contains("PRICE"));
        assert!(excerpt.len() <= 2 * super::EVIDENCE_RADIUS + "PRICE".len());
        assert!(!excerpt.starts_with('x') || excerpt.len() < content.len());
    }

    #[test]
    fn snippet_never_splits_multibyte_characters() {
        let content = "€".repeat(200);
        let excerpt = snippet(&content, 301);
        assert!(excerpt.chars().all(|c| c == '€'));
    }
}
