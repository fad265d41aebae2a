//! CLI argument parsing via `clap`.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "uncovered",
    version,
    about = "Show uncovered lines from a Go coverage profile",
    long_about = "Uncovered — print the source lines a test run never executed, with context.\n\nConfiguration precedence: CLI > uncovered.toml > defaults.",
    after_help = "Examples:\n  go test -coverprofile=coverage.out ./...\n  uncovered coverage.out\n  uncovered coverage.out --exclude '*_gen.go' --color never\n  uncovered coverage.out --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(help = "Path to the coverage profile (e.g. coverage.out)")]
    pub profile: PathBuf,
    #[arg(long, help = "Project root used to locate sources (default: discovered)")]
    pub root: Option<String>,
    #[arg(long, value_parser = ["human", "json"], help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, value_parser = ["auto", "always", "never"], help = "Color mode: auto|always|never (default: auto)")]
    pub color: Option<String>,
    #[arg(long, help = "Skip files whose profile name matches this glob (repeatable)")]
    pub exclude: Vec<String>,
}
