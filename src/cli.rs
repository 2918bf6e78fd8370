//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `pdpguard`.
#[derive(Debug, Parser)]
#[command(name = "pdpguard", version, about = "Compile and run product-page verification workflows")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile a prose request into a workflow specification.
    Compile {
        /// The prose request to compile.
        prompt: String,
        /// Build a deterministic fallback spec instead of calling the LLM
        /// when compilation fails.
        #[arg(long)]
        fallback: bool,
        /// Write the compiled spec to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Validate a workflow specification file.
    Validate {
        /// Path to the spec file (JSON or YAML).
        #[arg(long)]
        spec: PathBuf,
    },
    /// Run verification for a workflow specification.
    Run {
        /// Path to the spec file (JSON or YAML).
        #[arg(long)]
        spec: PathBuf,
        /// Dispatch the selected actions instead of printing them.
        #[arg(long)]
        execute: bool,
        /// Approve dispatch for specs that set requireApproval.
        #[arg(long)]
        yes: bool,
        /// Write the run report to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Discover product page URLs linked from a seed page.
    Discover {
        /// The seed page URL to crawl.
        seed: String,
        /// Maximum number of URLs to collect.
        #[arg(long, default_value_t = 10)]
        max: usize,
    },
    /// Ask the language model to diagnose failures in a run report.
    Diagnose {
        /// Path to the spec file that drove the run.
        #[arg(long)]
        spec: PathBuf,
        /// Path to the run report written by `run --out`.
        #[arg(long)]
        report: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_compile_subcommand() {
        let cli = Cli::parse_from(["pdpguard", "compile", "check my PDPs", "--fallback"]);
        assert!(matches!(cli.command, Command::Compile { fallback: true, .. }));
    }

    #[test]
    fn parses_run_subcommand_with_flags() {
        let cli =
            Cli::parse_from(["pdpguard", "run", "--spec", "spec.json", "--execute", "--yes"]);
        match cli.command {
            Command::Run { execute, yes, out, .. } => {
                assert!(execute);
                assert!(yes);
                assert!(out.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn discover_defaults_the_cap() {
        let cli = Cli::parse_from(["pdpguard", "discover", "https://shop.example.com"]);
        assert!(matches!(cli.command, Command::Discover { max: 10, .. }));
    }
}
