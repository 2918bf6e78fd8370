//! Assertion set: the signals a check demands from each target page.

use serde::{Deserialize, Serialize};

/// The signals a check demands from each target page.
///
/// At least one field must be enabled for a check to be meaningful; the
/// validator rejects an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionSet {
    /// Require a detectable price.
    #[serde(default)]
    pub price: bool,
    /// Require a detectable Add-to-Cart control.
    #[serde(default)]
    pub atc: bool,
    /// Require the page to contain this literal, case-insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_includes: Option<String>,
}

impl AssertionSet {
    /// Returns `true` when no signal is requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.price && !self.atc && self.text_includes.is_none()
    }
}
