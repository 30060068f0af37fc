//! Page loop
//!
//! Fetches catalogue pages one at a time, starting from the configured URL
//! and following each page's "next" link, until the page budget is spent or
//! the catalogue ends. A fixed pause separates successive fetches.

use crate::config::Config;
use crate::crawler::document::ListingSelectors;
use crate::crawler::extractor::ListingExtractor;
use crate::crawler::fetcher::{FetchError, PageFetcher};
use crate::listing::{ListingRecord, PriceFilter};
use crate::ScrapeError;
use std::time::Duration;
use url::Url;

/// What happened on one fetched page
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    /// 1-based position in the run
    pub index: u32,
    pub url: Url,
    /// Records extracted before filtering
    pub extracted: usize,
    /// Records kept after the price filter
    pub retained: usize,
}

/// Outcome of a run
///
/// `records` holds everything accumulated before the run ended, including
/// when it was halted by a fetch failure.
#[derive(Debug, Default)]
pub struct RunReport {
    pub records: Vec<ListingRecord>,
    pub pages: Vec<PageSummary>,
    /// Fetch failure that stopped the run early
    pub halted: Option<FetchError>,
}

impl RunReport {
    pub fn total_rows(&self) -> usize {
        self.records.len()
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }
}

/// Sequential catalogue walker
pub struct Driver {
    fetcher: PageFetcher,
    extractor: ListingExtractor,
    filter: PriceFilter,
    start_url: Url,
    max_pages: u32,
    delay: Duration,
}

impl Driver {
    /// Builds a driver from validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Driver)` - HTTP client built and selectors compiled
    /// * `Err(ScrapeError)` - Bad start URL, selector, or client settings
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let selectors = ListingSelectors::compile(&config.selectors)?;
        let fetcher = PageFetcher::new(&config.http)?;
        let start_url = Url::parse(&config.scraper.start_url)?;

        Ok(Self {
            fetcher,
            extractor: ListingExtractor::new(selectors),
            filter: PriceFilter::new(config.scraper.max_price),
            start_url,
            max_pages: config.scraper.pages,
            delay: config.scraper.delay()?,
        })
    }

    /// Runs the page loop to completion or first fetch failure
    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::default();
        let mut current = self.start_url.clone();

        tracing::info!(
            "Scraping up to {} pages from {} (delay {:?}, max price {:?})",
            self.max_pages,
            current,
            self.delay,
            self.filter.ceiling()
        );

        for index in 1..=self.max_pages {
            let content = match self.fetcher.fetch(&current).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::error!("Page {} failed, stopping run: {}", index, e);
                    report.halted = Some(e);
                    break;
                }
            };

            let page = self.extractor.extract(&content, &current);
            let extracted = page.records.len();
            let kept = self.filter.apply(page.records);
            let retained = kept.len();

            tracing::info!(
                "Page {} ({}): {} extracted, {} retained",
                index,
                current,
                extracted,
                retained
            );

            report.records.extend(kept);
            report.pages.push(PageSummary {
                index,
                url: current.clone(),
                extracted,
                retained,
            });

            let Some(next) = page.next_page else {
                tracing::info!("No next page after page {}, catalogue finished", index);
                break;
            };

            if index == self.max_pages {
                break;
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            current = next;
        }

        tracing::info!(
            "Run finished: {} pages, {} rows{}",
            report.pages.len(),
            report.total_rows(),
            if report.is_halted() { " (halted)" } else { "" }
        );

        report
    }
}
