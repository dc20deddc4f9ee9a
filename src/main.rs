//! TIOJ Harvest main entry point
//!
//! This is the command-line interface for the ranked-user harvester.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tioj_harvest::config::{load_config_with_hash, Config};
use tioj_harvest::harvester::{harvest, Endpoints, WindowScheduler};
use tioj_harvest::output::print_report;
use tracing_subscriber::EnvFilter;

/// TIOJ Harvest: ranked-user and activity harvester
///
/// Walks the judge's user ranking, then writes one JSON record per ranked user
/// with their profile and most recent submissions.
#[derive(Parser, Debug)]
#[command(name = "tioj-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Harvests ranked users and their recent activity", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be fetched without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    let report = harvest(&config).await.context("harvest failed")?;

    if !cli.quiet {
        print_report(&report);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tioj_harvest=info,warn"),
            1 => EnvFilter::new("tioj_harvest=debug,info"),
            2 => EnvFilter::new("tioj_harvest=trace,debug"),
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

/// Handles the --dry-run mode: prints the planned requests and output layout
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let endpoints = Endpoints::new(&config.source.base_url)?;
    let list = WindowScheduler::new(config.run.list_window());
    let detail = WindowScheduler::new(config.run.detail_window());

    println!("=== TIOJ Harvest Dry Run ===\n");

    println!("Source:");
    println!("  Base URL: {}", endpoints.base());
    println!("  Origin header: {}", endpoints.origin());
    println!("  Client identifier: {}", config.source.client_identifier);
    if config.source.request_timeout_secs > 0 {
        println!("  Request timeout: {}s", config.source.request_timeout_secs);
    } else {
        println!("  Request timeout: none");
    }

    println!("\nListing phase:");
    println!("  Pages: 1..={}", config.run.max_page);
    println!(
        "  Window: {} ({} chunks)",
        list.width(),
        list.chunk_count(config.run.max_page as usize)
    );
    if config.run.max_page > 0 {
        println!("  First request: {}", endpoints.listing(1));
    }

    println!("\nDetail phase:");
    println!("  Window: {}", detail.width());
    println!("  Profile request (example): {}", endpoints.profile("example"));
    println!("  Activity request (example): {}", endpoints.activity("1"));

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);

    println!("\n✓ Configuration is valid");

    Ok(())
}
