//! Price text handling
//!
//! Catalogue prices look like `£51.77`. Pages served without a charset are
//! sometimes decoded as Latin-1, which turns the two UTF-8 bytes of `£`
//! into `Â£`.

use crate::listing::ListingRecord;

/// `£` (U+00A3) encoded as UTF-8 and decoded as Latin-1
const POUND_MOJIBAKE: &str = "\u{00C2}\u{00A3}";

const POUND: &str = "\u{00A3}";

/// Replaces the mis-decoded pound sign with the real one
pub fn normalize_currency(raw: &str) -> String {
    raw.replace(POUND_MOJIBAKE, POUND)
}

/// Parses a displayed price into a number
///
/// Keeps only digits and the `.`/`,` separators. When both separators are
/// present the last one is the decimal mark; a lone `,` is a decimal mark.
/// Returns `None` when nothing numeric remains or the remainder does not
/// parse, never an error.
///
/// # Example
///
/// ```
/// use books_scrape::listing::parse_price;
///
/// assert_eq!(parse_price("£53.74"), Some(53.74));
/// assert_eq!(parse_price("£N/A"), None);
/// ```
pub fn parse_price(raw: &str) -> Option<f64> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    if kept.is_empty() {
        return None;
    }

    let normalized = match (kept.rfind(','), kept.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => kept.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => kept.replace(',', ""),
        (Some(_), None) => kept.replace(',', "."),
        _ => kept,
    };

    normalized.parse::<f64>().ok()
}

/// Optional inclusive price ceiling
///
/// A record whose price could not be parsed is always retained: an unknown
/// price is not evidence that the book is too expensive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceFilter {
    ceiling: Option<f64>,
}

impl PriceFilter {
    pub fn new(ceiling: Option<f64>) -> Self {
        Self { ceiling }
    }

    /// Filter that keeps every record
    pub fn disabled() -> Self {
        Self { ceiling: None }
    }

    pub fn ceiling(&self) -> Option<f64> {
        self.ceiling
    }

    /// Returns true if the record passes the filter
    pub fn retains(&self, record: &ListingRecord) -> bool {
        match (self.ceiling, record.price_value) {
            (None, _) | (_, None) => true,
            (Some(ceiling), Some(price)) => price <= ceiling,
        }
    }

    /// Drops records priced above the ceiling, preserving order
    pub fn apply(&self, records: Vec<ListingRecord>) -> Vec<ListingRecord> {
        records.into_iter().filter(|r| self.retains(r)).collect()
    }
}
