//! Uncovered CLI binary entry point.
//! Parses the profile, extracts uncovered lines and prints the report.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use owo_colors::OwoColorize;
use std::io;
use uncovered::cli::Cli;
use uncovered::{config, extract, output, profile, FsSource};

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        let prefix = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            "error:".red().bold().to_string()
        } else {
            "error:".to_string()
        };
        eprintln!("{} {:#}", prefix, e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let eff = config::resolve_effective(
        cli.root.as_deref(),
        cli.output.as_deref(),
        cli.color.as_deref(),
        &cli.exclude,
    )
    .context("resolving configuration")?;
    if !eff.config_found {
        debug!("no uncovered.toml found under {}; using defaults", eff.project_root.display());
    }
    let excludes = eff.exclude_patterns()?;

    let prof = profile::read(&cli.profile)
        .with_context(|| format!("loading profile {}", cli.profile.display()))?;
    info!("{} blocks in {} mode", prof.blocks.len(), prof.mode);

    let files: Vec<_> = extract::uncovered_lines(&prof.blocks)
        .into_iter()
        .filter(|f| !excludes.iter().any(|p| p.matches(&f.file_name)))
        .collect();

    let source = FsSource::new(&eff.source_root).with_module(eff.module.clone());
    let color = output::use_colors(&eff.output, &eff.color);
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    output::print_report(&mut lock, &files, &source, &eff.output, color)?;
    Ok(())
}
