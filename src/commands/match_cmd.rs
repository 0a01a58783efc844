//! Match command implementation
//!
//! The match command loads module selectors and a repository catalog, runs
//! the modular matching pipeline once and prints the four result sets.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use modmatch::defaults::{DEFAULT_CATALOG_FILE, DEFAULT_CONFIG_FILE, DEFAULT_WORKERS};
use modmatch::matcher::Matcher;
use modmatch::output::{emoji, render_json, render_text, OutputConfig};
use modmatch::phases::ModularMatcher;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Sorted listing, one unit per line
    Text,
    /// Pretty-printed JSON document
    Json,
}

/// Arguments for the match command
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Path to the module selector file
    #[arg(short, long, value_name = "PATH", env = "MODMATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the repository catalog snapshot
    #[arg(long, value_name = "PATH", env = "MODMATCH_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Number of concurrent repository searches
    #[arg(
        short,
        long,
        value_name = "N",
        env = "MODMATCH_WORKERS",
        default_value_t = DEFAULT_WORKERS
    )]
    pub workers: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Suppress the header and summary lines in text output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the match command
pub fn execute(args: MatchArgs, color: &str) -> Result<()> {
    let output_config = OutputConfig::from_env_and_flag(color);

    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    if !config_path.exists() {
        anyhow::bail!("Configuration file not found: {}", config_path.display());
    }

    let catalog_path = args
        .catalog
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE));
    if !catalog_path.exists() {
        anyhow::bail!("Catalog file not found: {}", catalog_path.display());
    }

    let selectors = modmatch::config::from_file(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let repos = modmatch::catalog::from_file(&catalog_path)
        .with_context(|| format!("Failed to load {}", catalog_path.display()))?
        .into_repo_set();

    let text_mode = args.format == OutputFormat::Text && !args.quiet;
    if text_mode {
        println!(
            "{} Matching {} module selector(s)",
            emoji(&output_config, "🔍", "[MATCH]"),
            selectors.len()
        );
        println!();
    }

    let mut matcher = ModularMatcher::with_workers(args.workers, repos, selectors)?;
    matcher.run()?;
    let output = matcher
        .take_output()
        .context("Matcher finished without publishing output")?;

    match args.format {
        OutputFormat::Text => {
            print!("{}", render_text(&output_config, &output));
            if text_mode {
                let summary = output.summary();
                println!();
                println!(
                    "{} {} modules, {} binary, {} debug, {} source packages",
                    emoji(&output_config, "✅", "[OK]"),
                    summary.modules,
                    summary.binary_rpms,
                    summary.debug_rpms,
                    summary.source_rpms
                );
            }
        }
        OutputFormat::Json => println!("{}", render_json(&output)?),
    }

    Ok(())
}
