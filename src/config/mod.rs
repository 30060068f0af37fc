//! Configuration module for Books-Scrape
//!
//! Configuration is assembled once at startup (defaults, then an optional
//! TOML file, then command-line overrides) and passed by reference to every
//! component.
//!
//! # Example
//!
//! ```no_run
//! use books_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("books.toml")).unwrap();
//! println!("Scraping up to {} pages", config.scraper.pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, OutputConfig, ScraperConfig, SelectorConfig, DEFAULT_START_URL,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
