//! `pdpguard validate` command.

use std::path::Path;

use crate::config::EngineConfig;
use crate::spec;
use crate::validate;

/// Execute the `validate` command.
///
/// # Errors
///
/// Returns an error string when the file cannot be loaded or the spec
/// violates the schema; the message names the first violated field path.
pub fn run(spec_path: &Path) -> Result<(), String> {
    let spec = spec::load(spec_path)?;
    validate::validate(&spec, &EngineConfig::default()).map_err(|e| e.to_string())?;

    let targets: usize = spec.checks.iter().map(|c| c.urls.len()).sum();
    println!("Spec '{}' is valid: {} check(s), {} target(s)", spec.name, spec.checks.len(), targets);
    Ok(())
}
