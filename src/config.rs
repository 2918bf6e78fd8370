//! Engine limits and defaults.
//!
//! All operational limits live in an explicit [`EngineConfig`] that is passed
//! into the scheduler, validator, and compiler at call time. Deep call paths
//! never read ambient process state.

/// Operational limits for verification runs and spec validation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of concurrent verification workers in a batch.
    pub concurrency: usize,
    /// Maximum number of body bytes fed to the extractors per page.
    pub content_cap_bytes: usize,
    /// Lowest accepted `guardrails.timeout_seconds`.
    pub min_timeout_seconds: u64,
    /// Highest accepted `guardrails.timeout_seconds`.
    pub max_timeout_seconds: u64,
    /// Highest accepted `guardrails.max_targets`.
    pub max_targets_ceiling: usize,
    /// Target cap applied by the deterministic fallback spec builder.
    pub fallback_max_targets: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            content_cap_bytes: 300_000,
            min_timeout_seconds: 5,
            max_timeout_seconds: 120,
            max_targets_ceiling: 200,
            fallback_max_targets: 50,
        }
    }
}
