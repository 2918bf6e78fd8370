//! `pdpguard run` command.

use std::path::Path;
use std::sync::Arc;

use crate::branch;
use crate::config::EngineConfig;
use crate::context::ServiceContext;
use crate::dispatch;
use crate::report::RunReport;
use crate::spec;
use crate::validate;
use crate::verify;

/// Execute the `run` command.
///
/// Verifies the spec's targets, prints the per-target report, selects the
/// action branch, and with `--execute` dispatches the selected actions.
/// Without `--execute` the selection is printed as a dry run.
///
/// # Errors
///
/// Returns an error string when the spec is invalid, approval is required
/// but not granted, or every dispatch channel fails.
pub async fn run(
    ctx: &ServiceContext,
    spec_path: &Path,
    execute: bool,
    yes: bool,
    out: Option<&Path>,
) -> Result<(), String> {
    let config = EngineConfig::default();
    let spec = spec::load(spec_path)?;
    validate::validate(&spec, &config).map_err(|e| e.to_string())?;

    let started_at = ctx.clock.now();
    let (verdicts, summary) =
        verify::run_verification(Arc::clone(&ctx.fetcher), &spec, &config).await;

    for verdict in &verdicts {
        let mark = if verdict.passed { "PASS" } else { "FAIL" };
        if verdict.passed {
            println!("  [{mark}] {} ({} ms)", verdict.url, verdict.millis);
        } else {
            println!(
                "  [{mark}] {} ({} ms) — {}",
                verdict.url,
                verdict.millis,
                verdict.failures.join(", ")
            );
        }
    }
    println!("{} passed / {} failed of {}", summary.passed, summary.failed, summary.total);

    if let Some(path) = out {
        let report = RunReport::new(started_at, spec.name.clone(), verdicts.clone(), summary);
        report.save(path)?;
        println!("Run report written to {}", path.display());
    }

    let selection = branch::select(&spec, &summary);
    println!("Branch: {:?} → {} action(s)", selection.trigger, selection.actions.len());

    if !execute {
        for action in &selection.actions {
            println!("  would dispatch {}", action.label());
        }
        return Ok(());
    }

    if spec.require_approval.unwrap_or(false) && !yes {
        return Err("Spec requires approval: re-run with --yes to dispatch".to_string());
    }

    let outcomes = dispatch::dispatch_actions(
        ctx.notifier.as_ref(),
        &selection.actions,
        &spec.name,
        &verdicts,
        &summary,
    )
    .await;

    for outcome in &outcomes {
        let mark = if outcome.ok { "ok" } else { "failed" };
        println!("  dispatch {} — {mark} ({})", outcome.action, outcome.detail);
    }

    if dispatch::any_delivered(&outcomes) {
        Ok(())
    } else {
        Err("All dispatch channels failed".to_string())
    }
}
