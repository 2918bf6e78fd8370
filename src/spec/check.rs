//! A single product-page check within a workflow spec.

use serde::{Deserialize, Serialize};

use super::assertions::AssertionSet;
use super::condition::Condition;

fn default_check_name() -> String {
    "PDP Check".to_string()
}

/// One verification check: a target list, the demanded signals, and
/// optional conditional branches on the aggregate outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCheck {
    /// Human-readable check name.
    #[serde(default = "default_check_name")]
    pub name: String,
    /// Target page URLs, deduplicated at construction, capped by
    /// `guardrails.max_targets`.
    pub urls: Vec<String>,
    /// The signals every target must show.
    pub assertions: AssertionSet,
    /// Ordered conditional branches consulted by the branch selector.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

#[cfg(test)]
mod tests {
    use super::PageCheck;

    #[test]
    fn name_defaults_when_omitted() {
        let check: PageCheck = serde_json::from_str(
            r#"{"urls":["https://shop.example.com/products/a"],"assertions":{"price":true}}"#,
        )
        .unwrap();
        assert_eq!(check.name, "PDP Check");
        assert!(check.conditions.is_empty());
    }
}
