use crate::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// Default catalogue entry point (page 1 of the listing)
pub const DEFAULT_START_URL: &str = "https://books.toscrape.com/catalogue/page-1.html";

/// Browser-like user agent; the demo site serves the same markup to any client
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Main configuration structure for Books-Scrape
///
/// Every section is optional in the TOML file; missing keys fall back to
/// the defaults for the books.toscrape.com catalogue.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub http: HttpConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// Pagination and filtering behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScraperConfig {
    /// First catalogue page to fetch
    pub start_url: String,

    /// Maximum number of catalogue pages to fetch
    pub pages: u32,

    /// Inclusive price ceiling; `None` disables the filter
    pub max_price: Option<f64>,

    /// Pause between successive page fetches (seconds)
    pub delay_secs: f64,
}

impl ScraperConfig {
    /// Returns the inter-page delay as a `Duration`
    ///
    /// Fails for negative, non-finite, or out-of-range values.
    pub fn delay(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(self.delay_secs).map_err(|_| {
            ConfigError::Validation(format!(
                "delay_secs must be a finite number >= 0 within range, got {}",
                self.delay_secs
            ))
        })
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            pages: 3,
            max_price: None,
            delay_secs: 1.0,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 15,
            connect_timeout_secs: 10,
        }
    }
}

/// CSS selectors describing the catalogue markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    /// Repeated container, one per book
    pub listing: String,

    /// Element carrying the title, relative to the container
    pub title: String,

    /// Attribute holding the full title (the link text is truncated)
    pub title_attribute: String,

    /// Element whose `href` points at the detail page
    pub link: String,

    pub price: String,

    pub stock: String,

    /// Pagination link to the following page
    pub next_page: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing: "article.product_pod".to_string(),
            title: "h3 a".to_string(),
            title_attribute: "title".to_string(),
            link: "h3 a".to_string(),
            price: ".price_color".to_string(),
            stock: ".instock.availability".to_string(),
            next_page: "li.next a".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the CSV file
    pub path: String,

    /// Field delimiter
    pub delimiter: char,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "books.csv".to_string(),
            delimiter: ',',
        }
    }
}
