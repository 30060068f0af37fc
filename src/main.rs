//! Books-Scrape main entry point
//!
//! This is the command-line interface for the catalogue scraper.

use anyhow::Context;
use books_scrape::config::{load_config_with_hash, validate, Config};
use books_scrape::crawler::run_and_save;
use books_scrape::output::print_run_summary;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Books-Scrape: scrape the books.toscrape.com catalogue into CSV
///
/// Fetches catalogue pages one by one, following the "next" link, and saves
/// title, price, stock and URL for every listed book. Flags override values
/// from the optional TOML configuration file.
#[derive(Parser, Debug)]
#[command(name = "books-scrape")]
#[command(version)]
#[command(about = "Scrape the books.toscrape.com catalogue into CSV", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// How many catalogue pages to scrape [default: 3]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pages: Option<u32>,

    /// Keep only rows with price <= this value; rows without a price are kept
    #[arg(long, value_name = "PRICE")]
    max_price: Option<f64>,

    /// Output CSV filename [default: books.csv]
    #[arg(long, value_name = "PATH")]
    out: Option<String>,

    /// Delay in seconds between pages [default: 1.0]
    #[arg(long, value_name = "SECS")]
    delay: Option<f64>,

    /// Catalogue page to start from [default: page 1]
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// CSV delimiter [default: ,]
    #[arg(long, value_name = "CHAR")]
    sep: Option<char>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the configuration and show what would be scraped without fetching
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(pages) = self.pages {
            config.scraper.pages = pages;
        }
        if let Some(max_price) = self.max_price {
            config.scraper.max_price = Some(max_price);
        }
        if let Some(out) = &self.out {
            config.output.path = out.clone();
        }
        if let Some(delay) = self.delay {
            config.scraper.delay_secs = delay;
        }
        if let Some(start_url) = &self.start_url {
            config.scraper.start_url = start_url.clone();
        }
        if let Some(sep) = self.sep {
            config.output.delimiter = sep;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("books_scrape=info,warn"),
            1 => EnvFilter::new("books_scrape=debug,info"),
            2 => EnvFilter::new("books_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("loading {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    cli.apply_overrides(&mut config);
    validate(&config).context("invalid run parameters")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(ExitCode::SUCCESS);
    }

    handle_scrape(&config).await
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Books-Scrape Dry Run ===\n");

    println!("Scraper:");
    println!("  Start URL: {}", config.scraper.start_url);
    println!("  Pages: {}", config.scraper.pages);
    match config.scraper.max_price {
        Some(max) => println!("  Max price: {}", max),
        None => println!("  Max price: (disabled)"),
    }
    println!("  Delay: {}s", config.scraper.delay_secs);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nSelectors:");
    println!("  Listing: {}", config.selectors.listing);
    println!(
        "  Title: {} [{}]",
        config.selectors.title, config.selectors.title_attribute
    );
    println!("  Link: {}", config.selectors.link);
    println!("  Price: {}", config.selectors.price);
    println!("  Stock: {}", config.selectors.stock);
    println!("  Next page: {}", config.selectors.next_page);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.path);
    println!("  Delimiter: {:?}", config.output.delimiter);

    println!("\n✓ Configuration is valid");
}

/// Handles the scrape: run, save, summarize
///
/// Rows gathered before a fetch failure are saved; the process then exits
/// with a failure status.
async fn handle_scrape(config: &Config) -> anyhow::Result<ExitCode> {
    let report = run_and_save(config).await.context("scrape failed")?;

    print_run_summary(&report, Path::new(&config.output.path));

    match &report.halted {
        None => Ok(ExitCode::SUCCESS),
        Some(e) => {
            eprintln!(
                "Error: run halted at {}: {} ({} rows from earlier pages were saved)",
                e.url(),
                e,
                report.total_rows()
            );
            Ok(ExitCode::FAILURE)
        }
    }
}
