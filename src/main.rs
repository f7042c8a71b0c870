//! docs-harvest main entry point
//!
//! This is the command-line interface for the docs-harvest content crawler.

use anyhow::Context;
use clap::Parser;
use docs_harvest::config::{load_config_with_hash, Config};
use docs_harvest::crawler::harvest;
use docs_harvest::output::print_statistics;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// docs-harvest: a domain-scoped documentation harvester
///
/// docs-harvest crawls pages reachable from a seed URL whose links contain
/// an allow-listed prefix, and appends every distinct block of main page
/// text to an output file.
#[derive(Parser, Debug)]
#[command(name = "docs-harvest")]
#[command(version)]
#[command(about = "A domain-scoped documentation harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG", default_value = "harvest.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docs_harvest=info,warn"),
            1 => EnvFilter::new("docs_harvest=debug,info"),
            2 => EnvFilter::new("docs_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let stats = harvest(&config)
        .await
        .with_context(|| format!("Harvest from {} failed", config.start_url))?;

    if !cli.quiet {
        print_statistics(&stats);
    }

    Ok(())
}

/// Handles the --dry-run mode: shows the validated configuration
fn print_dry_run(config: &Config) {
    println!("=== docs-harvest Dry Run ===\n");

    println!("Start URL: {}", config.start_url);
    println!("Output file: {}", config.file_name);
    println!("Delay between links: {}s", config.sleep_time);
    println!(
        "User agent: {}",
        config
            .user_agent
            .as_deref()
            .unwrap_or(docs_harvest::crawler::DEFAULT_USER_AGENT)
    );

    println!("\nAllowed prefixes ({}):", config.allowed_prefixes.len());
    for prefix in &config.allowed_prefixes {
        println!("  - {}", prefix);
    }

    println!("\n✓ Configuration is valid");
}
