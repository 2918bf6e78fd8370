//! Per-target verdicts and the aggregate summary.

use serde::{Deserialize, Serialize};

/// Stable, machine-readable failure codes.
///
/// Codes are part of the engine's observable contract: downstream alert
/// formatting and tests both key on them.
pub mod codes {
    /// No price signal detected.
    pub const MISSING_PRICE: &str = "MISSING:Price";
    /// No Add-to-Cart signal detected.
    pub const MISSING_ATC: &str = "MISSING:AddToCart";
    /// The target did not complete before the batch deadline.
    pub const CANCELLED_DEADLINE: &str = "CANCELLED:Deadline";

    /// The required literal was not found.
    #[must_use]
    pub fn missing_text(literal: &str) -> String {
        format!("MISSING:Text(\"{literal}\")")
    }

    /// The fetch failed with the given error class.
    #[must_use]
    pub fn fetch_error(kind: &str) -> String {
        format!("FETCH_ERROR:{kind}")
    }

    /// The target answered with a non-success HTTP status.
    #[must_use]
    pub fn http_status(status: u16) -> String {
        format!("HTTP:{status}")
    }
}

/// The per-target verification result.
///
/// Created once per target per run and never mutated. Serialized field
/// names (`ok`, `failures`, `millis`) match the report rows consumed by
/// downstream automation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The target URL.
    pub url: String,
    /// Whether every requested assertion held. True iff `failures` is empty.
    #[serde(rename = "ok")]
    pub passed: bool,
    /// Ordered failure codes; empty iff `passed`.
    pub failures: Vec<String>,
    /// Wall-clock milliseconds spent on this target.
    pub millis: u64,
    /// Excerpt justifying the first positive detection, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl Verdict {
    /// Builds a verdict from collected failures; `passed` is derived.
    #[must_use]
    pub fn from_failures(
        url: impl Into<String>,
        failures: Vec<String>,
        millis: u64,
        evidence: Option<String>,
    ) -> Self {
        Self { url: url.into(), passed: failures.is_empty(), failures, millis, evidence }
    }

    /// A terminal verdict for a target cancelled by the batch deadline.
    #[must_use]
    pub fn cancelled(url: impl Into<String>, millis: u64) -> Self {
        Self::from_failures(url, vec![codes::CANCELLED_DEADLINE.to_string()], millis, None)
    }
}

/// Aggregate pass/fail counts over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of verdicts.
    pub total: usize,
    /// Number of passing verdicts.
    pub passed: usize,
    /// `total - passed`.
    pub failed: usize,
}

impl Summary {
    /// Derives the summary from a verdict sequence.
    #[must_use]
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let total = verdicts.len();
        let passed = verdicts.iter().filter(|v| v.passed).count();
        Self { total, passed, failed: total - passed }
    }

    /// True when at least one target failed.
    #[must_use]
    pub fn any_failed(&self) -> bool {
        self.passed < self.total
    }
}
