//! `pdpguard diagnose` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::diagnose::{self, Diagnosis};
use crate::report::RunReport;
use crate::spec;

/// Execute the `diagnose` command.
///
/// # Errors
///
/// Returns an error string when the spec or report cannot be loaded. A
/// skipped diagnosis (model unavailable) is reported, not an error.
pub async fn run(ctx: &ServiceContext, spec_path: &Path, report_path: &Path) -> Result<(), String> {
    let spec = spec::load(spec_path)?;
    let report = RunReport::load(report_path)?;

    if report.summary.failed == 0 {
        println!("Nothing to diagnose: all {} target(s) passed", report.summary.total);
        return Ok(());
    }

    match diagnose::diagnose_failures(ctx.llm.as_ref(), &spec, &report.verdicts).await {
        Diagnosis::Produced { text } => {
            println!("{text}");
            Ok(())
        }
        Diagnosis::Skipped { reason } => {
            println!("Diagnosis skipped: {reason}");
            Ok(())
        }
    }
}
