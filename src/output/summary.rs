//! Console summary of a run
//!
//! Printed to stdout regardless of the log level.

use crate::crawler::{PageSummary, RunReport};
use std::path::Path;

/// `Page N: <count> rows`, counting rows kept after filtering
pub fn format_page_line(page: &PageSummary) -> String {
    format!("Page {}: {} rows", page.index, page.retained)
}

/// `Saved <total> rows to <path>`
pub fn format_saved_line(total: usize, path: &Path) -> String {
    format!("Saved {} rows to {}", total, path.display())
}

/// Prints one line per fetched page and the final saved line
pub fn print_run_summary(report: &RunReport, path: &Path) {
    for page in &report.pages {
        println!("{}", format_page_line(page));
    }
    println!("{}", format_saved_line(report.total_rows(), path));
}
