//! Output module for scrape results
//!
//! This module handles:
//! - Writing records to a CSV file
//! - Printing the per-page and final console summary

mod csv_output;
mod summary;

pub use csv_output::{write_csv, write_records};
pub use summary::{format_page_line, format_saved_line, print_run_summary};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
