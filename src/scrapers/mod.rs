//! Page fetching and news-table extraction.
//!
//! Scraping is split into two phases, mirroring how the pipeline consumes them:
//!
//! 1. **Fetching**: Download a ticker's quote page ([`PageFetcher`])
//! 2. **Extraction**: Pull [`RawHeadlineRow`]s out of the page's news table
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Finviz quote pages | [`finviz`] | HTML scraping | News table with id `news-table` |
//!
//! [`RawHeadlineRow`]: crate::models::RawHeadlineRow

use std::error::Error;

pub mod finviz;

/// Something that can return the markup of a ticker's quote page.
///
/// The production implementation talks HTTP; tests substitute canned pages.
pub trait PageFetcher {
    /// Fetch the raw page for `ticker`.
    ///
    /// # Returns
    ///
    /// The response body, or an error for transport failures and non-success
    /// statuses.
    async fn fetch(&self, ticker: &str) -> Result<String, Box<dyn Error>>;
}
