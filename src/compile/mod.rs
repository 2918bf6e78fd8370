//! Prose-to-specification compilation.
//!
//! The heavy lifting is delegated to a language model through the
//! [`LlmClient`] port; this engine's only contract with it is that the
//! response must parse and validate as a [`WorkflowSpec`]. One repair
//! attempt re-prompts with the validation failure. When compilation fails
//! altogether the caller may fall back to [`fallback_spec`], a
//! deterministic builder that extracts literal URLs from the prompt.

use std::error::Error;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::ports::llm::{CompletionRequest, LlmClient};
use crate::spec::{Action, AssertionSet, Guardrails, PageCheck, WorkflowSpec};
use crate::validate;

const COMPILE_MODEL: &str = "claude-sonnet-4-20250514";
const COMPILE_MAX_TOKENS: u32 = 2048;

const COMPILE_SYSTEM_PROMPT: &str = "You compile natural-language requests into a JSON workflow \
for ecommerce ops. Return ONLY valid JSON adhering to the provided schema. No prose, no comments.";

static LITERAL_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s"'<>]+"#).expect("hardwired pattern"));

/// Compiles a prose request into a validated workflow spec.
///
/// # Errors
///
/// Returns an error when both the first attempt and the repair attempt fail
/// to produce a schema-valid spec.
pub async fn compile_spec(
    llm: &dyn LlmClient,
    prompt: &str,
    config: &EngineConfig,
) -> Result<WorkflowSpec, Box<dyn Error + Send + Sync>> {
    let first = attempt(llm, &build_compile_prompt(prompt), config).await;
    let first_error = match first {
        Ok(spec) => return Ok(spec),
        Err(err) => err,
    };

    warn!(error = %first_error, "compile attempt failed, trying repair");
    let repair_prompt = format!(
        "The previous attempt failed schema validation with: {first_error}\n\
         Produce a corrected JSON workflow. Original request:\n{prompt}"
    );
    attempt(llm, &build_compile_prompt(&repair_prompt), config)
        .await
        .map_err(|repair_error| format!("compile failed twice: {first_error}; {repair_error}").into())
}

async fn attempt(
    llm: &dyn LlmClient,
    prompt: &str,
    config: &EngineConfig,
) -> Result<WorkflowSpec, Box<dyn Error + Send + Sync>> {
    let request = CompletionRequest {
        model: COMPILE_MODEL.to_string(),
        system: Some(COMPILE_SYSTEM_PROMPT.to_string()),
        prompt: prompt.to_string(),
        max_tokens: COMPILE_MAX_TOKENS,
    };
    let response = llm.complete(&request).await?;
    let mut spec: WorkflowSpec = serde_json::from_str(strip_code_fences(&response.text))
        .map_err(|e| format!("response is not a valid workflow spec: {e}"))?;
    dedup_targets(&mut spec);
    validate::validate(&spec, config)?;
    debug!(name = %spec.name, checks = spec.checks.len(), "compiled workflow spec");
    Ok(spec)
}

fn build_compile_prompt(request: &str) -> String {
    format!(
        r#"Compile the following request into a JSON workflow specification.

Request: {request}

The JSON object must have this shape:
{{
  "name": "<workflow name>",
  "checks": [{{
    "name": "<check name>",
    "urls": ["<absolute http(s) URL>", ...],
    "assertions": {{"price": <bool>, "atc": <bool>, "textIncludes": "<literal>" (optional)}},
    "conditions": [{{"trigger": "onPass"|"onFail", "actions": [<action>, ...]}}] (optional)
  }}],
  "actions": [<action>, ...],
  "guardrails": {{"timeoutSeconds": <5-120>, "maxTargets": <1-200>}},
  "requireApproval": <bool> (optional),
  "schedule": "<cron or prose schedule>" (optional)
}}

An <action> is one of:
  {{"type": "chat", "channel": "<#channel>", "template": "<title line>"}}
  {{"type": "webhook", "url": "<absolute URL>"}}
  {{"type": "email", "to": "<address>", "subject": "<subject>"}}

At least one assertion must be enabled per check. Respond ONLY with the JSON
object, no other text."#
    )
}

/// Strips a Markdown code fence if the model wrapped its JSON in one.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Deduplicates each check's targets, preserving first-occurrence order.
///
/// Dedup is a construction-time property of the target set; validation and
/// the scheduler both see the already-unique list.
fn dedup_targets(spec: &mut WorkflowSpec) {
    for check in &mut spec.checks {
        let mut seen = std::collections::HashSet::new();
        check.urls.retain(|url| seen.insert(url.clone()));
    }
}

/// Builds a deterministic fallback spec by literal URL extraction.
///
/// Used when the external compiler is unavailable or keeps failing: every
/// `http(s)` URL in the prompt becomes a target (deduplicated, capped),
/// with fixed default assertions and a single chat notification.
#[must_use]
pub fn fallback_spec(prompt: &str, config: &EngineConfig) -> WorkflowSpec {
    let mut seen = std::collections::HashSet::new();
    let urls: Vec<String> = LITERAL_URL
        .find_iter(prompt)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ')', ']']).to_string())
        .filter(|url| seen.insert(url.clone()))
        .take(config.fallback_max_targets)
        .collect();

    WorkflowSpec {
        name: "PDP Guard (fallback)".to_string(),
        checks: vec![PageCheck {
            name: "PDP Check".to_string(),
            urls,
            assertions: AssertionSet { price: true, atc: true, text_includes: None },
            conditions: Vec::new(),
        }],
        actions: vec![Action::Chat {
            channel: "#ops-alerts".to_string(),
            template: "PDP Guard results".to_string(),
        }],
        guardrails: Guardrails::default(),
        require_approval: None,
        schedule: None,
    }
}
