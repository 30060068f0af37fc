//! Listing data model
//!
//! A [`ListingRecord`] is one book scraped from a catalogue page. Records are
//! created by the extractor, optionally dropped by the [`PriceFilter`], and
//! written once by the CSV output at the end of a run. They are never
//! mutated after creation.

mod price;

pub use price::{normalize_currency, parse_price, PriceFilter};

use serde::Serialize;
use url::Url;

/// One book from a catalogue page
///
/// Field order matches the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    /// Full book title
    pub title: String,

    /// Price text as displayed, with the currency symbol normalized
    pub price_raw: String,

    /// Numeric price parsed from `price_raw`; `None` when unparseable
    pub price_value: Option<f64>,

    /// Availability text with whitespace collapsed
    pub stock: String,

    /// Absolute URL of the detail page
    pub url: String,
}

impl ListingRecord {
    /// Builds a record, deriving `price_value` from the normalized price text
    pub fn new(title: String, price_raw: &str, stock: String, url: &Url) -> Self {
        let price_raw = normalize_currency(price_raw);
        let price_value = parse_price(&price_raw);

        Self {
            title,
            price_raw,
            price_value,
            stock,
            url: url.to_string(),
        }
    }
}

/// Records extracted from a single catalogue page
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    /// Records in document order
    pub records: Vec<ListingRecord>,

    /// Resolved "next" pagination link, if the page has one
    pub next_page: Option<Url>,
}

impl PageResult {
    /// Returns true if the page links to a following page
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }
}
