//! Catalogue page extraction
//!
//! Turns one catalogue page into a [`PageResult`]: a record per listing
//! container plus the resolved "next" link. A container missing any required
//! field is skipped; the rest of the page is still returned.

use crate::crawler::document::{clean_text, ListingSelectors, Node};
use crate::listing::{ListingRecord, PageResult};
use scraper::Html;
use url::Url;

/// Extracts listing records from catalogue pages
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    selectors: ListingSelectors,
}

impl ListingExtractor {
    pub fn new(selectors: ListingSelectors) -> Self {
        Self { selectors }
    }

    /// Parses a catalogue page
    ///
    /// # Arguments
    ///
    /// * `content` - Raw HTML of the page
    /// * `base_url` - URL the page was fetched from, used to resolve links
    ///
    /// # Returns
    ///
    /// Records in document order and the next-page link, if any. Malformed
    /// entries are dropped rather than failing the page.
    ///
    /// # Example
    ///
    /// ```
    /// use books_scrape::config::SelectorConfig;
    /// use books_scrape::crawler::{ListingExtractor, ListingSelectors};
    /// use url::Url;
    ///
    /// let selectors = ListingSelectors::compile(&SelectorConfig::default()).unwrap();
    /// let extractor = ListingExtractor::new(selectors);
    /// let base = Url::parse("https://books.toscrape.com/catalogue/page-1.html").unwrap();
    ///
    /// let page = extractor.extract("<html><body></body></html>", &base);
    /// assert!(page.records.is_empty());
    /// assert!(!page.has_next_page());
    /// ```
    pub fn extract(&self, content: &str, base_url: &Url) -> PageResult {
        let document = Html::parse_document(content);
        let root = document.root_element();

        let containers = root.find_all(&self.selectors.listing);
        let total = containers.len();

        let records: Vec<ListingRecord> = containers
            .iter()
            .enumerate()
            .filter_map(|(index, container)| self.extract_record(container, index, base_url))
            .collect();

        if records.len() < total {
            tracing::debug!(
                "{}: skipped {} of {} listing entries",
                base_url,
                total - records.len(),
                total
            );
        }

        let next_page = root
            .find_first(&self.selectors.next_page)
            .and_then(|a| a.attr("href").and_then(|href| resolve_link(href, base_url)));

        PageResult { records, next_page }
    }

    /// Extracts one record, or `None` if a required field is missing
    fn extract_record<N: Node>(
        &self,
        container: &N,
        index: usize,
        base_url: &Url,
    ) -> Option<ListingRecord> {
        let s = &self.selectors;

        // The link text is truncated on the listing; the attribute has the full title
        let Some(title) = container
            .find_first(&s.title)
            .map(|el| match el.attr(&s.title_attribute).map(clean_text) {
                Some(full) if !full.is_empty() => full,
                _ => clean_text(&el.text()),
            })
            .filter(|t| !t.is_empty())
        else {
            return skipped(index, "title");
        };

        let Some(price_raw) = container
            .find_first(&s.price)
            .map(|el| clean_text(&el.text()))
            .filter(|p| !p.is_empty())
        else {
            return skipped(index, "price");
        };

        let Some(stock) = container
            .find_first(&s.stock)
            .map(|el| clean_text(&el.text()))
            .filter(|t| !t.is_empty())
        else {
            return skipped(index, "stock");
        };

        let Some(url) = container
            .find_first(&s.link)
            .and_then(|el| el.attr("href").and_then(|href| resolve_link(href, base_url)))
        else {
            return skipped(index, "url");
        };

        Some(ListingRecord::new(title, &price_raw, stock, &url))
    }
}

fn skipped(index: usize, field: &str) -> Option<ListingRecord> {
    tracing::debug!("Listing entry {} has no usable {}, skipping", index, field);
    None
}

/// Resolves a link href against the page URL
///
/// Returns None for empty, fragment-only, and non-HTTP(S) links.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => Some(absolute_url),
        _ => None,
    }
}
