//! Workflow specification validation.
//!
//! Every stage of the pipeline assumes a schema-valid spec, so validation
//! runs before anything consumes one. The first violation wins and is
//! reported with its field path; the engine never silently repairs or
//! coerces invalid input; repair is the external compiler's job.

use thiserror::Error;

use crate::config::EngineConfig;
use crate::spec::{Action, Condition, Trigger, WorkflowSpec};

/// A specification violation, naming the first violated field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid spec at {path}: {message}")]
pub struct SpecError {
    /// Dotted path of the violated field (e.g. `checks[0].urls[2]`).
    pub path: String,
    /// What the field was expected to satisfy.
    pub message: String,
}

impl SpecError {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

/// Validates a workflow spec against the schema and the engine's limits.
///
/// # Errors
///
/// Returns the first violation found, in field order.
pub fn validate(spec: &WorkflowSpec, config: &EngineConfig) -> Result<(), SpecError> {
    if spec.name.trim().is_empty() {
        return Err(SpecError::new("name", "must not be empty"));
    }

    if spec.checks.is_empty() {
        return Err(SpecError::new("checks", "at least one check is required"));
    }

    let guardrails = &spec.guardrails;
    if guardrails.timeout_seconds < config.min_timeout_seconds
        || guardrails.timeout_seconds > config.max_timeout_seconds
    {
        return Err(SpecError::new(
            "guardrails.timeoutSeconds",
            format!(
                "must be between {} and {}",
                config.min_timeout_seconds, config.max_timeout_seconds
            ),
        ));
    }
    if guardrails.max_targets == 0 || guardrails.max_targets > config.max_targets_ceiling {
        return Err(SpecError::new(
            "guardrails.maxTargets",
            format!("must be between 1 and {}", config.max_targets_ceiling),
        ));
    }

    for (check_idx, check) in spec.checks.iter().enumerate() {
        let base = format!("checks[{check_idx}]");

        if check.assertions.is_empty() {
            return Err(SpecError::new(
                format!("{base}.assertions"),
                "at least one of price, atc, textIncludes must be set",
            ));
        }
        if let Some(needle) = &check.assertions.text_includes {
            if needle.is_empty() {
                return Err(SpecError::new(
                    format!("{base}.assertions.textIncludes"),
                    "must not be empty",
                ));
            }
        }

        if check.urls.is_empty() {
            return Err(SpecError::new(format!("{base}.urls"), "at least one URL is required"));
        }
        if check.urls.len() > guardrails.max_targets {
            return Err(SpecError::new(
                format!("{base}.urls"),
                format!("exceeds guardrails.maxTargets ({})", guardrails.max_targets),
            ));
        }
        for (url_idx, url) in check.urls.iter().enumerate() {
            validate_url(url, &format!("{base}.urls[{url_idx}]"))?;
        }

        let mut seen_triggers: Vec<Trigger> = Vec::new();
        for (cond_idx, condition) in check.conditions.iter().enumerate() {
            validate_condition(condition, &format!("{base}.conditions[{cond_idx}]"))?;
            if seen_triggers.contains(&condition.trigger) {
                return Err(SpecError::new(
                    format!("{base}.conditions[{cond_idx}].trigger"),
                    "duplicate trigger; at most one condition per trigger",
                ));
            }
            seen_triggers.push(condition.trigger);
        }
    }

    if spec.actions.is_empty() {
        return Err(SpecError::new("actions", "at least one default action is required"));
    }
    for (action_idx, action) in spec.actions.iter().enumerate() {
        validate_action(action, &format!("actions[{action_idx}]"))?;
    }

    Ok(())
}

fn validate_url(url: &str, path: &str) -> Result<(), SpecError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|_| SpecError::new(path, "must be a well-formed absolute URL"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SpecError::new(path, "must use http or https"));
    }
    Ok(())
}

fn validate_condition(condition: &Condition, path: &str) -> Result<(), SpecError> {
    if condition.actions.is_empty() {
        return Err(SpecError::new(
            format!("{path}.actions"),
            "condition action list must not be empty",
        ));
    }
    for (action_idx, action) in condition.actions.iter().enumerate() {
        validate_action(action, &format!("{path}.actions[{action_idx}]"))?;
    }
    Ok(())
}

fn validate_action(action: &Action, path: &str) -> Result<(), SpecError> {
    match action {
        Action::Chat { channel, template } => {
            if channel.trim().is_empty() {
                return Err(SpecError::new(format!("{path}.channel"), "must not be empty"));
            }
            if template.trim().is_empty() {
                return Err(SpecError::new(format!("{path}.template"), "must not be empty"));
            }
        }
        Action::Webhook { url } => {
            validate_url(url, &format!("{path}.url"))?;
        }
        Action::Email { to, subject } => {
            if !to.contains('@') {
                return Err(SpecError::new(
                    format!("{path}.to"),
                    "must be a plausible email address",
                ));
            }
            if subject.trim().is_empty() {
                return Err(SpecError::new(format!("{path}.subject"), "must not be empty"));
            }
        }
    }
    Ok(())
}
