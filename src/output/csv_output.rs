//! CSV export
//!
//! Header `title,price_raw,price_value,stock,url`, one row per record in
//! extraction order, an empty `price_value` cell when the price was not
//! parseable.

use crate::listing::ListingRecord;
use crate::output::OutputResult;
use std::io::Write;
use std::path::Path;

/// Writes records to a CSV file, creating parent directories as needed
///
/// The header row is always written, even when there are no records.
///
/// # Arguments
///
/// * `path` - Destination file (truncated if it exists)
/// * `delimiter` - Field separator, an ASCII character
/// * `records` - Records in output order
pub fn write_csv(path: &Path, delimiter: char, records: &[ListingRecord]) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    write_records(file, delimiter, records)
}

/// Writes records as CSV to any writer
pub fn write_records<W: Write>(
    writer: W,
    delimiter: char,
    records: &[ListingRecord],
) -> OutputResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(["title", "price_raw", "price_value", "stock", "url"])?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    Ok(())
}
