//! Top-level workflow specification.

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::check::PageCheck;

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_targets() -> usize {
    50
}

/// Resource guardrails for a verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardrails {
    /// Wall-clock budget for the whole batch, in seconds.
    #[serde(default = "default_timeout_seconds", alias = "timeoutSec")]
    pub timeout_seconds: u64,
    /// Maximum number of targets any single check may carry.
    #[serde(default = "default_max_targets", alias = "maxUrls")]
    pub max_targets: usize,
}

impl Default for Guardrails {
    fn default() -> Self {
        Self { timeout_seconds: default_timeout_seconds(), max_targets: default_max_targets() }
    }
}

/// The validated unit of work: what to check, what counts as pass/fail,
/// and what to do in each case.
///
/// Constructed once (by the external compiler or the deterministic fallback
/// builder) and immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSpec {
    /// Workflow name, used as the default alert title.
    pub name: String,
    /// One or more page checks. The first is the primary check consulted
    /// by the branch selector.
    pub checks: Vec<PageCheck>,
    /// Default action list, the fallback when no condition matches.
    pub actions: Vec<Action>,
    /// Run guardrails.
    #[serde(default)]
    pub guardrails: Guardrails,
    /// When set, executing dispatch requires explicit operator approval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_approval: Option<bool>,
    /// Schedule expression carried verbatim for provisioning collaborators;
    /// never interpreted by this engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::Guardrails;

    #[test]
    fn guardrails_default_to_documented_values() {
        let guardrails = Guardrails::default();
        assert_eq!(guardrails.timeout_seconds, 60);
        assert_eq!(guardrails.max_targets, 50);
    }

    #[test]
    fn guardrails_fill_missing_fields() {
        let guardrails: Guardrails = serde_json::from_str(r#"{"timeoutSeconds": 30}"#).unwrap();
        assert_eq!(guardrails.timeout_seconds, 30);
        assert_eq!(guardrails.max_targets, 50);
    }
}
