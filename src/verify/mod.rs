//! Verification pipeline: per-target verdicts and batch scheduling.

pub mod page;
pub mod scheduler;
pub mod verdict;

use std::sync::Arc;

pub use page::verify_page;
pub use scheduler::run_batch;
pub use verdict::{codes, Summary, Verdict};

use crate::config::EngineConfig;
use crate::ports::fetch::PageFetcher;
use crate::spec::WorkflowSpec;

/// Runs the full verification pipeline over the spec's primary check.
///
/// Pure with respect to the spec: nothing is mutated, and the only side
/// effects are outbound fetches to the check's targets. Returns one verdict
/// per target in input order plus the derived summary.
pub async fn run_verification(
    fetcher: Arc<dyn PageFetcher>,
    spec: &WorkflowSpec,
    config: &EngineConfig,
) -> (Vec<Verdict>, Summary) {
    let (urls, assertions) = match spec.checks.first() {
        Some(check) => (check.urls.clone(), check.assertions.clone()),
        None => (Vec::new(), crate::spec::AssertionSet::default()),
    };
    let verdicts =
        run_batch(fetcher, &urls, &assertions, spec.guardrails.timeout_seconds, config).await;
    let summary = Summary::from_verdicts(&verdicts);
    (verdicts, summary)
}
