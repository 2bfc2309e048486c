//! Price-Scout main entry point
//!
//! This is the command-line interface for the Price-Scout best-price finder.

use anyhow::Context;
use clap::Parser;
use price_scout::config::{load_config_with_hash, Config};
use price_scout::crawler::PriceCrawler;
use price_scout::report::{format_markdown_report, write_markdown_report, ProductQuery};
use price_scout::server::{serve, AppState};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Price-Scout: a best-price finder for retail marketplaces
///
/// By default Price-Scout serves `POST /best-price`. With `--query` it runs a
/// single lookup and prints a markdown report instead.
#[derive(Parser, Debug)]
#[command(name = "price-scout")]
#[command(version = "1.0.0")]
#[command(about = "A best-price finder for retail marketplaces", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and print the effective settings without serving
    #[arg(long, conflicts_with = "query")]
    dry_run: bool,

    /// Run a single lookup for this product and print the report
    #[arg(long, value_name = "PRODUCT")]
    query: Option<String>,

    /// Write the lookup report to this file instead of stdout
    #[arg(short, long, value_name = "PATH", requires = "query")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e)
                        .with_context(|| format!("loading config {}", path.display()));
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    price_scout::config::validate(&config)
        .context("invalid effective configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else if let Some(product) = &cli.query {
        handle_query(&config, product, cli.output.as_deref()).await?;
    } else {
        handle_serve(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG`, when set, takes precedence over the flags.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("price_scout=info,warn"),
                1 => EnvFilter::new("price_scout=debug,info"),
                2 => EnvFilter::new("price_scout=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: prints the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Price-Scout Dry Run ===\n");

    println!("Server:");
    println!("  Address: {}:{}", config.server.host, config.server.port);
    println!("  Request timeout: {}ms", config.server.request_timeout_ms);

    println!("\nFetcher:");
    println!("  User agent: {}", config.user_agent.value);
    println!("  Page timeout: {}ms", config.fetcher.page_timeout_ms);
    println!("  Settle delay: {}ms", config.fetcher.settle_delay_ms);
    println!(
        "  Ready selector: {}",
        config.fetcher.ready_selector.as_deref().unwrap_or("-")
    );
    println!("  Search timeout: {}ms", config.fetcher.search_timeout_ms);

    println!("\nSearch:");
    println!("  Endpoint: {}", config.search.endpoint);
    for marketplace in config.search.active_marketplaces() {
        println!("  - site:{}", marketplace.site());
    }

    println!("\nExtraction:");
    println!(
        "  Plausible range: [{}, {}]",
        config.extraction.min_price, config.extraction.max_price
    );
    println!("  Extra rules: {}", config.extraction.rules.len());
    for rule in &config.extraction.rules {
        println!("  - {}: {}", rule.name, rule.pattern);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles --query: one lookup, report to stdout or a file
async fn handle_query(
    config: &Config,
    product: &str,
    output: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let query = ProductQuery::new(product)?;
    let crawler = PriceCrawler::new(config)?;

    let report = match crawler.best_price(&query).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Lookup failed: {}", e);
            return Err(e.into());
        }
    };

    match output {
        Some(path) => {
            write_markdown_report(&report, path)
                .with_context(|| format!("writing report to {}", path.display()))?;
            println!("✓ Report written to: {}", path.display());
        }
        None => print!("{}", format_markdown_report(&report)),
    }

    Ok(())
}

/// Handles the default mode: serve HTTP until stopped
async fn handle_serve(config: &Config) -> anyhow::Result<()> {
    let crawler = PriceCrawler::new(config)?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    tracing::info!(
        "Marketplaces: {}",
        config
            .search
            .active_marketplaces()
            .iter()
            .map(|m| m.site())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let bounds = crawler.extractor().bounds();
    tracing::info!(
        "Price rules: {} (plausible range [{}, {}])",
        crawler.extractor().rules().len(),
        bounds.min,
        bounds.max
    );

    serve(AppState::new(crawler), &addr)
        .await
        .with_context(|| format!("serving on {}", addr))?;
    Ok(())
}
