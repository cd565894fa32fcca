// SPDX-License-Identifier: PMPL-1.0-or-later
//! Wcagbot CLI - WCAG 2.1 A/AA Template Auditor
//!
//! With no arguments, audits the configured documents and writes the JSON
//! snapshot and HTML report into the configured output directory.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};
use wcagbot::config::{default_config_path, load_config};
use wcagbot::criteria::Registry;
use wcagbot::report::{generate_report, write_reports, OutputFormat};
use wcagbot::scanner::{discover_documents, run_audit};
use wcagbot::tools::{configured_scanners, ExternalScanner};

/// WCAG 2.1 A/AA accessibility auditor for HTML templates
#[derive(Parser)]
#[command(name = "wcagbot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Documents to audit (replaces the configured list)
    files: Vec<PathBuf>,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Audit every HTML document under this directory
    #[arg(long, conflicts_with = "files")]
    dir: Option<PathBuf>,

    /// Directory for the JSON snapshot and HTML report
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip the external scanners (axe-core, pa11y)
    #[arg(long)]
    no_external: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

type LogHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn log_filter(verbose: bool, level: &str) -> EnvFilter {
    if verbose {
        EnvFilter::new("wcagbot=debug")
    } else {
        EnvFilter::try_new(format!("wcagbot={}", level)).unwrap_or_else(|_| EnvFilter::new("wcagbot=info"))
    }
}

/// Install the subscriber before anything logs. The filter can be swapped
/// once the configured level is known.
fn init_logging(verbose: bool) -> LogHandle {
    let (filter, handle) = reload::Layer::new(log_filter(verbose, "info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    handle
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_handle = init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = load_config(&config_path)?;
    if !cli.verbose {
        log_handle.reload(log_filter(false, &config.log.level))?;
    }

    if let Some(dir) = cli.dir {
        config.documents = discover_documents(&dir);
    } else if !cli.files.is_empty() {
        config.documents = cli.files;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output.dir = output_dir;
    }

    let registry = Registry::wcag21()?;
    let scanners: Vec<Box<dyn ExternalScanner>> = if cli.no_external {
        Vec::new()
    } else {
        configured_scanners(&config.tools)
    };

    info!(
        "Auditing {} document(s) against {} criteria",
        config.documents.len(),
        registry.len()
    );
    let run = run_audit(&config.documents, &registry, &scanners);
    let paths = write_reports(&run, &registry, &config)?;

    println!("{}", generate_report(&run, &registry, &config, OutputFormat::Text)?);
    eprintln!("Results saved to {}", paths.json.display());
    eprintln!("HTML report: {}", paths.html.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_configured_level() {
        assert_eq!(log_filter(true, "warn").to_string(), "wcagbot=debug");
        assert_eq!(log_filter(false, "warn").to_string(), "wcagbot=warn");
    }

    #[test]
    fn test_invalid_level_falls_back_to_info() {
        assert_eq!(log_filter(false, "not a level!").to_string(), "wcagbot=info");
    }

    #[test]
    fn test_configured_level_applied_after_startup() {
        let (_layer, handle) = reload::Layer::<EnvFilter, tracing_subscriber::Registry>::new(log_filter(false, "info"));
        handle.reload(log_filter(false, "trace")).unwrap();
        assert_eq!(handle.with_current(|f| f.to_string()).unwrap(), "wcagbot=trace");
    }
}
