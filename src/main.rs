//! Nobel-Harvest main entry point
//!
//! Starts the background scrape and serves the query API.

use anyhow::Context;
use clap::Parser;
use nobel_harvest::config::{load_optional_config, Config};
use nobel_harvest::crawler::spawn_scrape;
use nobel_harvest::server::serve;
use nobel_harvest::storage::PrizeStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Nobel-Harvest: scrape Nobel Prize laureates and serve them over HTTP
///
/// On startup the laureate listing is scraped once in the background while
/// the API is already answering. `/scraping-status` reports progress and
/// `/nobel-prizes` serves the records once the scrape has completed.
#[derive(Parser, Debug)]
#[command(name = "nobel-harvest")]
#[command(version)]
#[command(about = "Scrape Nobel Prize laureates and serve them over HTTP", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on (overrides server.bind-address)
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and print the effective settings without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_optional_config(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid built-in configuration".to_string(),
    })?;

    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
        nobel_harvest::config::validate(&config).context("Invalid --bind address")?;
    }

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let store = Arc::new(PrizeStore::new());
    let bind_address = config.server.bind_address.clone();

    tracing::info!(
        "Scraping {} with {} workers, at most {} requests per {}ms",
        config.scraper.seed_url,
        config.scraper.max_workers,
        config.rate_limit.max_calls,
        config.rate_limit.period_ms
    );
    let scrape = spawn_scrape(config, Arc::clone(&store));

    serve(&bind_address, store, shutdown_signal())
        .await
        .with_context(|| format!("Server on {} failed", bind_address))?;

    scrape.abort();
    tracing::info!("Shut down");
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("nobel_harvest=info,warn"),
            1 => EnvFilter::new("nobel_harvest=debug,info"),
            2 => EnvFilter::new("nobel_harvest=trace,debug"),
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

/// Resolves on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Handles the --dry-run mode: shows the effective configuration
fn print_dry_run(config: &Config) {
    println!("=== Nobel-Harvest Dry Run ===\n");

    println!("Scraper:");
    println!("  Seed URL: {}", config.scraper.seed_url);
    println!("  Link selector: {}", config.scraper.link_selector);
    println!("  Max workers: {}", config.scraper.max_workers);

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  Max attempts: {}", config.fetcher.max_attempts);
    println!("  Retry backoff: {}ms", config.fetcher.retry_backoff_ms);

    println!("\nRate limit:");
    println!(
        "  {} requests per {}ms",
        config.rate_limit.max_calls, config.rate_limit.period_ms
    );

    println!("\nServer:");
    println!("  Bind address: {}", config.server.bind_address);

    println!("\n✓ Configuration is valid");
}
