//! Crawler module for catalogue fetching and extraction
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching of catalogue pages
//! - Typed access to the parsed markup
//! - Listing extraction and pagination detection
//! - The sequential page loop

mod document;
mod driver;
mod extractor;
mod fetcher;

pub use document::{clean_text, ListingSelectors, Node};
pub use driver::{Driver, PageSummary, RunReport};
pub use extractor::ListingExtractor;
pub use fetcher::{build_http_client, FetchError, PageFetcher};

use crate::config::Config;
use crate::output::write_csv;
use crate::ScrapeError;
use std::path::Path;

/// Runs a complete scrape and writes the CSV
///
/// Records collected before a fetch failure are still written; the failure
/// is reported through [`RunReport::halted`] so the caller can decide how to
/// exit.
///
/// # Arguments
///
/// * `config` - The validated configuration
///
/// # Returns
///
/// * `Ok(RunReport)` - The CSV was written (possibly from a halted run)
/// * `Err(ScrapeError)` - Setup failed or the CSV could not be written
pub async fn run_and_save(config: &Config) -> Result<RunReport, ScrapeError> {
    let driver = Driver::new(config)?;
    let report = driver.run().await;

    let path = Path::new(&config.output.path);
    write_csv(path, config.output.delimiter, &report.records)?;
    tracing::info!("Wrote {} rows to {}", report.total_rows(), path.display());

    Ok(report)
}
