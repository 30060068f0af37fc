//! Books-Scrape: a polite catalogue scraper for books.toscrape.com
//!
//! This crate walks the paginated catalogue of the demo bookshop, extracts
//! one record per listed book (title, price, stock, detail URL), optionally
//! filters by a price ceiling and writes the results to a CSV file.

pub mod config;
pub mod crawler;
pub mod listing;
pub mod output;

use thiserror::Error;

pub use crawler::FetchError;
pub use output::OutputError;

/// Main error type for Books-Scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Network(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector for {name}: '{selector}'")]
    InvalidSelector { name: &'static str, selector: String },
}

/// Result type alias for Books-Scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_and_save, Driver, RunReport};
pub use listing::{ListingRecord, PageResult, PriceFilter};
