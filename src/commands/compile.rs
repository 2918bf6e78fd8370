//! `pdpguard compile` command.

use std::path::Path;

use crate::compile;
use crate::config::EngineConfig;
use crate::context::ServiceContext;
use crate::validate;

/// Execute the `compile` command.
///
/// Compiles the prompt through the LLM; with `--fallback`, a failed (or
/// unconfigured) compilation falls back to deterministic URL extraction.
///
/// # Errors
///
/// Returns an error string when compilation fails and no usable fallback
/// spec can be built.
pub async fn run(
    ctx: &ServiceContext,
    prompt: &str,
    fallback: bool,
    out: Option<&Path>,
) -> Result<(), String> {
    let config = EngineConfig::default();

    let spec = match compile::compile_spec(ctx.llm.as_ref(), prompt, &config).await {
        Ok(spec) => spec,
        Err(err) if fallback => {
            eprintln!("Compilation failed ({err}); building fallback spec");
            let spec = compile::fallback_spec(prompt, &config);
            validate::validate(&spec, &config)
                .map_err(|e| format!("Fallback spec unusable ({e}); does the prompt contain URLs?"))?;
            spec
        }
        Err(err) => return Err(format!("Compilation failed: {err}")),
    };

    let json = serde_json::to_string_pretty(&spec)
        .map_err(|e| format!("Failed to serialize spec: {e}"))?;

    match out {
        Some(path) => {
            std::fs::write(path, &json)
                .map_err(|e| format!("Failed to write spec {}: {e}", path.display()))?;
            println!("Wrote spec '{}' to {}", spec.name, path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
