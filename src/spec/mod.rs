//! Workflow specification types.
//!
//! Defines the Rust types that mirror the JSON workflow schema produced by
//! the external compiler. Field names serialize in camelCase so compiler
//! output and files written by earlier tooling parse unchanged. Specs are
//! immutable for the duration of a run.

mod action;
mod assertions;
mod check;
mod condition;
mod workflow;

use std::path::Path;

pub use action::Action;
pub use assertions::AssertionSet;
pub use check::PageCheck;
pub use condition::{Condition, Trigger};
pub use workflow::{Guardrails, WorkflowSpec};

/// Loads a workflow spec from a JSON or YAML file, picked by extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<WorkflowSpec, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read spec file {}: {e}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse spec file {}: {e}", path.display()))
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse spec file {}: {e}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r##"{
            "name": "PDP Guard",
            "checks": [{
                "name": "PDP Check",
                "urls": ["https://shop.example.com/products/a"],
                "assertions": { "price": true, "atc": true },
                "conditions": [
                    { "trigger": "onFail", "actions": [{ "type": "chat", "channel": "#ops-alerts", "template": "PDP failures" }] }
                ]
            }],
            "actions": [{ "type": "chat", "channel": "#ops", "template": "PDP Guard results" }],
            "guardrails": { "timeoutSeconds": 60, "maxTargets": 50 }
        }"##
    }

    #[test]
    fn parses_camel_case_json() {
        let spec: WorkflowSpec = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(spec.name, "PDP Guard");
        assert_eq!(spec.checks.len(), 1);
        assert_eq!(spec.checks[0].conditions[0].trigger, Trigger::OnFail);
        assert_eq!(spec.guardrails.timeout_seconds, 60);
    }

    #[test]
    fn accepts_legacy_field_names() {
        // Earlier compiler snapshots emitted timeoutSec/maxUrls/textIncludes
        // and tagged chat actions as "slack".
        let spec: WorkflowSpec = serde_json::from_str(
            r##"{
                "name": "legacy",
                "checks": [{
                    "urls": ["https://shop.example.com/products/a"],
                    "assertions": { "textIncludes": "In stock" }
                }],
                "actions": [{ "type": "slack", "channel": "#ops", "template": "t" }],
                "guardrails": { "timeoutSec": 30, "maxUrls": 10 }
            }"##,
        )
        .unwrap();
        assert_eq!(spec.checks[0].assertions.text_includes.as_deref(), Some("In stock"));
        assert!(matches!(spec.actions[0], Action::Chat { .. }));
        assert_eq!(spec.guardrails.timeout_seconds, 30);
        assert_eq!(spec.guardrails.max_targets, 10);
    }

    #[test]
    fn load_parses_yaml_by_extension() {
        let dir = std::env::temp_dir().join("pdpguard_spec_load_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("spec.yaml");
        std::fs::write(
            &path,
            concat!(
                "name: yaml spec\n",
                "checks:\n",
                "  - urls: [\"https://shop.example.com/products/a\"]\n",
                "    assertions:\n",
                "      price: true\n",
                "actions:\n",
                "  - type: chat\n",
                "    channel: \"#ops\"\n",
                "    template: results\n",
                "guardrails:\n",
                "  timeoutSeconds: 45\n",
            ),
        )
        .unwrap();

        let spec = load(&path).unwrap();
        assert_eq!(spec.name, "yaml spec");
        assert_eq!(spec.guardrails.timeout_seconds, 45);
        assert_eq!(spec.guardrails.max_targets, 50);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn round_trips_through_json() {
        let spec: WorkflowSpec = serde_json::from_str(sample_json()).unwrap();
        let encoded = serde_json::to_string(&spec).unwrap();
        let decoded: WorkflowSpec = serde_json::from_str(&encoded).unwrap();
        assert_eq!(spec, decoded);
        // The external contract is camelCase on the wire.
        assert!(encoded.contains("\"timeoutSeconds\""));
        assert!(encoded.contains("\"onFail\""));
    }
}
