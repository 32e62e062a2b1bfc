//! The scrape → normalize → score → aggregate run.
//!
//! Tickers are processed one at a time. A ticker whose fetch fails, or whose
//! page has no news table, contributes no records; it never stops the run.

use crate::aggregate::AggregateTable;
use crate::models::{NewsRecord, TickerOutcome};
use crate::normalize::Normalizer;
use crate::scrapers::PageFetcher;
use crate::scrapers::finviz::extract_news_table;
use crate::sentiment::SentimentScorer;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, instrument, warn};

/// Everything a run produced.
#[derive(Debug)]
pub struct RunReport {
    /// One entry per ticker, in processing order.
    pub outcomes: Vec<(String, TickerOutcome)>,
    pub records: Vec<NewsRecord>,
    pub aggregate: AggregateTable,
}

pub struct Pipeline<F, S> {
    fetcher: F,
    scorer: S,
    normalizer: Normalizer,
}

impl<F, S> Pipeline<F, S>
where
    F: PageFetcher,
    S: SentimentScorer,
{
    pub fn new(fetcher: F, scorer: S, normalizer: Normalizer) -> Self {
        Self {
            fetcher,
            scorer,
            normalizer,
        }
    }

    /// Run every ticker through the pipeline and aggregate the result.
    #[instrument(level = "info", skip_all, fields(tickers = tickers.len(), today = %self.normalizer.today()))]
    pub async fn run(&self, tickers: &[&str]) -> RunReport {
        let per_ticker: Vec<(String, TickerOutcome, Vec<NewsRecord>)> = stream::iter(tickers)
            .then(|ticker| async move {
                let (outcome, records) = self.process_ticker(ticker).await;
                (ticker.to_string(), outcome, records)
            })
            .collect()
            .await;

        let mut outcomes = Vec::with_capacity(per_ticker.len());
        let mut records = Vec::new();
        for (ticker, outcome, ticker_records) in per_ticker {
            outcomes.push((ticker, outcome));
            records.extend(ticker_records);
        }

        let records: Vec<NewsRecord> = records
            .into_iter()
            .map(|record| {
                let compound = self.scorer.compound(&record.title);
                debug!(ticker = %record.ticker, title = %truncate_for_log(&record.title, 80), compound, "Scored headline");
                record.with_compound(compound)
            })
            .collect();
        info!(count = records.len(), "Scored headlines");

        let aggregate = AggregateTable::from_records(&records);
        info!(
            tickers = aggregate.tickers().len(),
            dates = aggregate.dates().len(),
            groups = aggregate.group_count(),
            "Aggregated sentiment"
        );

        RunReport {
            outcomes,
            records,
            aggregate,
        }
    }

    #[instrument(level = "info", skip(self))]
    async fn process_ticker(&self, ticker: &str) -> (TickerOutcome, Vec<NewsRecord>) {
        let html = match self.fetcher.fetch(ticker).await {
            Ok(html) => html,
            Err(e) => {
                error!(%ticker, error = %e, "Failed to retrieve data; skipping ticker");
                return (
                    TickerOutcome::FetchFailed {
                        reason: truncate_for_log(&e.to_string(), 200),
                    },
                    Vec::new(),
                );
            }
        };

        let Some(table) = extract_news_table(&html) else {
            warn!(%ticker, "No news table on page; skipping ticker");
            return (TickerOutcome::NoTable, Vec::new());
        };

        let rows = table.rows.len();
        let records = self.normalizer.normalize_table(ticker, table.rows);
        info!(%ticker, rows, skipped = table.skipped, "Extracted headlines");
        (
            TickerOutcome::Fetched {
                rows,
                skipped: table.skipped,
            },
            records,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{DateFill, RunContext, YearAssumption};
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::error::Error;

    /// Serves canned pages; tickers without a page fail like an HTTP 404.
    struct FakeFetcher {
        pages: HashMap<&'static str, String>,
    }

    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, ticker: &str) -> Result<String, Box<dyn Error>> {
            self.pages
                .get(ticker)
                .cloned()
                .ok_or_else(|| format!("HTTP status client error (404 Not Found) for {ticker}").into())
        }
    }

    /// Looks the headline up in a fixed table.
    struct FakeScorer(HashMap<&'static str, f64>);

    impl SentimentScorer for FakeScorer {
        fn compound(&self, text: &str) -> f64 {
            self.0.get(text).copied().unwrap_or(0.0)
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn news_page(rows: &[(&str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(cell, title)| format!("<tr><td>{cell}</td><td><a href=\"#\">{title}</a></td></tr>"))
            .collect();
        format!("<html><body><table id=\"news-table\">{body}</table></body></html>")
    }

    fn pipeline(
        pages: HashMap<&'static str, String>,
        today: NaiveDate,
        date_fill: DateFill,
    ) -> Pipeline<FakeFetcher, FakeScorer> {
        let scorer = FakeScorer(HashMap::from([
            ("Stock rises", 0.6),
            ("Stock up more", 0.2),
            ("Sales slump", -0.4),
        ]));
        let normalizer = Normalizer::new(RunContext {
            today,
            date_fill,
            year_assumption: YearAssumption::Current,
        });
        Pipeline::new(FakeFetcher { pages }, scorer, normalizer)
    }

    fn aapl_page() -> String {
        news_page(&[("Jan 5 09:00AM", "Stock rises"), ("10:30AM", "Stock up more")])
    }

    #[tokio::test]
    async fn test_same_day_rows_aggregate_into_one_group() {
        let pages = HashMap::from([("AAPL", aapl_page())]);
        let p = pipeline(pages, ymd(2026, 10, 16), DateFill::CarryForward);
        let report = p.run(&["AAPL"]).await;

        let jan5 = ymd(2026, 1, 5);
        assert_eq!(report.records.len(), 2);
        assert!(report.records.iter().all(|r| r.date == jan5));
        assert_eq!(report.records[0].time.as_deref(), Some("09:00AM"));
        assert_eq!(report.records[1].time.as_deref(), Some("10:30AM"));
        assert_eq!(report.aggregate.group_count(), 1);
        let mean = report.aggregate.get("AAPL", jan5).unwrap();
        assert!((mean - 0.4).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_same_day_rows_with_today_fill_on_that_day() {
        let jan5 = ymd(2026, 1, 5);
        let pages = HashMap::from([("AAPL", aapl_page())]);
        let p = pipeline(pages, jan5, DateFill::Today);
        let report = p.run(&["AAPL"]).await;

        assert!(report.records.iter().all(|r| r.date == jan5));
        assert_eq!(report.aggregate.group_count(), 1);
        assert!((report.aggregate.get("AAPL", jan5).unwrap() - 0.4).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_today_fill_splits_dateless_row_onto_today() {
        let today = ymd(2026, 10, 16);
        let pages = HashMap::from([("AAPL", aapl_page())]);
        let p = pipeline(pages, today, DateFill::Today);
        let report = p.run(&["AAPL"]).await;

        assert_eq!(report.records[0].date, ymd(2026, 1, 5));
        assert_eq!(report.records[1].date, today);
        assert_eq!(report.aggregate.group_count(), 2);
        assert_eq!(report.aggregate.get("AAPL", today), Some(0.2));
    }

    #[tokio::test]
    async fn test_failed_fetch_contributes_nothing() {
        let pages = HashMap::from([
            ("AAPL", aapl_page()),
            ("TSLA", news_page(&[("Jan 6 08:00AM", "Sales slump")])),
        ]);
        let p = pipeline(pages, ymd(2026, 10, 16), DateFill::CarryForward);
        let report = p.run(&["AMZN", "AAPL", "TSLA"]).await;

        assert!(matches!(report.outcomes[0], (ref t, TickerOutcome::FetchFailed { .. }) if t == "AMZN"));
        assert_eq!(report.outcomes[1].1, TickerOutcome::Fetched { rows: 2, skipped: 0 });
        assert_eq!(report.aggregate.tickers(), ["AAPL", "TSLA"]);
        assert!(report.records.iter().all(|r| r.ticker != "AMZN"));
        assert_eq!(report.aggregate.get("TSLA", ymd(2026, 1, 6)), Some(-0.4));
    }

    #[tokio::test]
    async fn test_page_without_table_is_skipped() {
        let pages = HashMap::from([
            ("GOOG", "<html><body><p>Quote not found</p></body></html>".to_string()),
            ("AAPL", aapl_page()),
        ]);
        let p = pipeline(pages, ymd(2026, 10, 16), DateFill::Today);
        let report = p.run(&["GOOG", "AAPL"]).await;

        assert_eq!(report.outcomes[0], ("GOOG".to_string(), TickerOutcome::NoTable));
        assert_eq!(report.aggregate.tickers(), ["AAPL"]);
    }

    #[tokio::test]
    async fn test_all_fetches_failing_gives_empty_aggregate() {
        let p = pipeline(HashMap::new(), ymd(2026, 10, 16), DateFill::Today);
        let report = p.run(&crate::models::TICKERS).await;

        assert_eq!(report.outcomes.len(), 5);
        assert!(
            report
                .outcomes
                .iter()
                .all(|(_, o)| matches!(o, TickerOutcome::FetchFailed { .. }))
        );
        assert!(report.records.is_empty());
        assert!(report.aggregate.is_empty());
    }

    #[tokio::test]
    async fn test_every_record_is_scored() {
        let pages = HashMap::from([("AAPL", aapl_page())]);
        let p = pipeline(pages, ymd(2026, 10, 16), DateFill::Today);
        let report = p.run(&["AAPL"]).await;
        assert_eq!(report.records[0].compound, Some(0.6));
        assert_eq!(report.records[1].compound, Some(0.2));
    }
}
