//! Command dispatch and handlers.

pub mod compile;
pub mod diagnose;
pub mod discover;
pub mod run;
pub mod validate;

use crate::cli::Command;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// Builds a live service context and a multi-threaded runtime; the
/// verification scheduler relies on parallel workers for I/O-bound fetches.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = ServiceContext::live();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    runtime.block_on(dispatch_with_context(command, &ctx))
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Compile { prompt, fallback, out } => {
            compile::run(ctx, prompt, *fallback, out.as_deref()).await
        }
        Command::Validate { spec } => validate::run(spec),
        Command::Run { spec, execute, yes, out } => {
            run::run(ctx, spec, *execute, *yes, out.as_deref()).await
        }
        Command::Discover { seed, max } => discover::run(ctx, seed, *max).await,
        Command::Diagnose { spec, report } => diagnose::run(ctx, spec, report).await,
    }
}
