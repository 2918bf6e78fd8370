//! LLM-backed failure diagnosis.
//!
//! Optional last step after a failing run: ask the language model for a
//! likely root cause, a minimal fix snippet, and an on-call runbook. The
//! diagnosis is advisory; an unavailable model skips it rather than
//! failing the run.

use tracing::warn;

use crate::ports::llm::{CompletionRequest, LlmClient};
use crate::spec::WorkflowSpec;
use crate::verify::Verdict;

const DIAGNOSE_MODEL: &str = "claude-sonnet-4-20250514";
const DIAGNOSE_MAX_TOKENS: u32 = 1024;

/// Prompt inputs are truncated so a huge report cannot blow the request.
const PROMPT_INPUT_CAP: usize = 4000;

/// The outcome of a diagnosis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnosis {
    /// The model produced advisory text.
    Produced {
        /// Root cause, fix snippet, and runbook as returned by the model.
        text: String,
    },
    /// Diagnosis was skipped; the run is unaffected.
    Skipped {
        /// Why the diagnosis was not produced.
        reason: String,
    },
}

/// Asks the language model to diagnose the failures in a run.
pub async fn diagnose_failures(
    llm: &dyn LlmClient,
    spec: &WorkflowSpec,
    verdicts: &[Verdict],
) -> Diagnosis {
    let spec_json = serde_json::to_string(spec).unwrap_or_default();
    let report_json = serde_json::to_string(verdicts).unwrap_or_default();

    let prompt = [
        "You are a senior storefront engineer. Given failures on product pages, produce:",
        "1) A short, likely root cause (2-3 bullets).",
        "2) A minimal HTML/template snippet to restore the missing price or Add-to-Cart control.",
        "3) A 3-5 step runbook for the engineer on-call.",
        "",
        &format!("SPEC:\n{}", truncate_chars(&spec_json, PROMPT_INPUT_CAP)),
        &format!("REPORT:\n{}", truncate_chars(&report_json, PROMPT_INPUT_CAP)),
    ]
    .join("\n");

    let request = CompletionRequest {
        model: DIAGNOSE_MODEL.to_string(),
        system: None,
        prompt,
        max_tokens: DIAGNOSE_MAX_TOKENS,
    };

    match llm.complete(&request).await {
        Ok(response) => Diagnosis::Produced { text: response.text },
        Err(err) => {
            warn!(error = %err, "diagnosis skipped");
            Diagnosis::Skipped { reason: err.to_string() }
        }
    }
}

fn truncate_chars(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
