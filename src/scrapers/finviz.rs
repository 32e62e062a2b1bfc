//! Finviz quote page scraper.
//!
//! Each ticker's quote page (`https://finviz.com/quote.ashx?t=AAPL`) carries a
//! table with id `news-table`, one headline per row:
//!
//! ```text
//! <tr><td>Jan 05 09:00AM</td><td><a href="...">Stock rises</a></td></tr>
//! <tr><td>10:30AM</td><td><a href="...">Stock up more</a></td></tr>
//! ```
//!
//! The date is only written on the first row of each day; later rows of the
//! same day carry the time alone.

use crate::models::RawHeadlineRow;
use crate::scrapers::PageFetcher;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://finviz.com/quote.ashx?t=";
pub const DEFAULT_USER_AGENT: &str = "my-app";

static NEWS_TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("#news-table").unwrap());
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// HTTP fetcher for Finviz quote pages.
#[derive(Debug, Clone)]
pub struct FinvizFetcher {
    client: Client,
    base_url: String,
}

impl FinvizFetcher {
    /// Build a fetcher whose requests carry `user_agent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, Box<dyn Error>> {
        Url::parse(base_url)?;
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// The quote page URL for `ticker`: the base URL with the encoded ticker appended.
    pub fn quote_url(&self, ticker: &str) -> Result<Url, Box<dyn Error>> {
        let url = format!("{}{}", self.base_url, urlencoding::encode(ticker));
        Ok(Url::parse(&url)?)
    }
}

impl PageFetcher for FinvizFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, ticker: &str) -> Result<String, Box<dyn Error>> {
        let url = self.quote_url(ticker)?;
        let body = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        info!(%url, bytes = body.len(), "Fetched quote page");
        Ok(body)
    }
}

/// Rows pulled from one news table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NewsTable {
    pub rows: Vec<RawHeadlineRow>,
    /// Rows dropped because they had no link or no data cell.
    pub skipped: usize,
}

/// Extract the news table from a quote page.
///
/// # Returns
///
/// `None` when the page has no element with id `news-table`. Otherwise the
/// table's rows in document order; rows missing a link or a data cell are
/// counted in [`NewsTable::skipped`] and left out.
#[instrument(level = "debug", skip_all, fields(bytes = html.len()))]
pub fn extract_news_table(html: &str) -> Option<NewsTable> {
    let document = Html::parse_document(html);
    let table = document.select(&NEWS_TABLE).next()?;

    let mut news = NewsTable::default();
    for (index, row) in table.select(&ROW).enumerate() {
        match extract_row(row) {
            Some(raw) => {
                debug!(index, headline = %raw.headline_text, date = ?raw.date_token, time = ?raw.time_token, "Extracted row");
                news.rows.push(raw);
            }
            None => {
                warn!(index, "News row has no link or no data cell; skipping");
                news.skipped += 1;
            }
        }
    }
    Some(news)
}

fn extract_row(row: ElementRef<'_>) -> Option<RawHeadlineRow> {
    let link = row.select(&LINK).next()?;
    let cell = row.select(&CELL).next()?;
    let headline = link.text().collect::<String>();
    let cell_text = cell.text().collect::<String>();
    Some(RawHeadlineRow::from_cell(headline.trim(), &cell_text))
}
