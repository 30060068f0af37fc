//! Typed access to the parsed catalogue markup
//!
//! The extractor only needs four operations on the parse tree, captured by
//! the [`Node`] trait. Selectors are compiled once from the configuration
//! into [`ListingSelectors`].

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::{ElementRef, Selector};

/// Minimal read-only view of an element in a parsed document
pub trait Node: Sized {
    /// All matching descendants, in document order
    fn find_all(&self, selector: &Selector) -> Vec<Self>;

    /// First matching descendant
    fn find_first(&self, selector: &Selector) -> Option<Self>;

    /// Value of the named attribute
    fn attr(&self, name: &str) -> Option<&str>;

    /// Concatenated text content, unmodified
    fn text(&self) -> String;
}

impl<'a> Node for ElementRef<'a> {
    fn find_all(&self, selector: &Selector) -> Vec<Self> {
        self.select(selector).collect()
    }

    fn find_first(&self, selector: &Selector) -> Option<Self> {
        self.select(selector).next()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compiled selectors for one catalogue layout
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub listing: Selector,
    pub title: Selector,
    pub title_attribute: String,
    pub link: Selector,
    pub price: Selector,
    pub stock: Selector,
    pub next_page: Selector,
}

impl ListingSelectors {
    /// Compiles every selector in the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ListingSelectors)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that failed
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            listing: compile_one("listing", &config.listing)?,
            title: compile_one("title", &config.title)?,
            title_attribute: config.title_attribute.clone(),
            link: compile_one("link", &config.link)?,
            price: compile_one("price", &config.price)?,
            stock: compile_one("stock", &config.stock)?,
            next_page: compile_one("next_page", &config.next_page)?,
        })
    }
}

fn compile_one(name: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        name,
        selector: selector.to_string(),
    })
}
