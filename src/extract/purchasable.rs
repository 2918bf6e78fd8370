//! Add-to-Cart detection.
//!
//! An OR of independent patterns with no priority among them. Storefront
//! templates vary too much for a single convention, so any one match counts.

use std::sync::LazyLock;

use regex::Regex;

use super::Detection;

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Submit control whose visible label reads "add (to) cart" or "buy now",
        // tolerating whitespace and HTML comments around the label.
        r"(?is)<button[^>]*>(?:\s|<!--.*?-->)*?(?:add\s*(?:to\s*)?cart|buy\s*now)(?:\s|<!--.*?-->)*?</button>",
        // Input or button named "add".
        r#"(?i)name=["']add["']"#,
        // Form submitting to a cart-add endpoint.
        r#"(?i)form[^>]+action=["'][^"']*/cart/add[^"']*["']"#,
        // Element identified as the add-to-cart control.
        r#"(?i)id=["']AddToCart["']"#,
        // Bare token, e.g. in a class list or inline script.
        r"(?i)\bAddToCart\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("hardwired pattern"))
    .collect()
});

/// Detects an Add-to-Cart control anywhere in the content.
#[must_use]
pub fn detect_add_to_cart(content: &str) -> Detection {
    for pattern in PATTERNS.iter() {
        if let Some(m) = pattern.find(content) {
            return Detection::hit(content, m.start());
        }
    }
    Detection::miss()
}
