//! Mean sentiment per (ticker, date).
//!
//! The result is a dense matrix: one row per ticker in first-appearance order,
//! one column per date in calendar order. A cell with no contributing
//! headlines is `None`, which is not the same thing as a neutral `0.0`.

use crate::models::NewsRecord;
use crate::utils::truncate_for_log;
use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{instrument, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateTable {
    tickers: Vec<String>,
    dates: Vec<NaiveDate>,
    /// `rows[t][d]` is the mean for `tickers[t]` on `dates[d]`.
    rows: Vec<Vec<Option<f64>>>,
}

impl AggregateTable {
    /// Group scored records by (ticker, date) and average their compound scores.
    ///
    /// Records that were never scored are ignored.
    #[instrument(level = "info", skip_all, fields(records = records.len()))]
    pub fn from_records(records: &[NewsRecord]) -> Self {
        let mut sums: HashMap<(&str, NaiveDate), (f64, usize)> = HashMap::new();
        for record in records {
            let Some(compound) = record.compound else {
                warn!(ticker = %record.ticker, title = %truncate_for_log(&record.title, 80), "Unscored record left out of aggregate");
                continue;
            };
            let entry = sums.entry((record.ticker.as_str(), record.date)).or_insert((0.0, 0));
            entry.0 += compound;
            entry.1 += 1;
        }

        let tickers: Vec<String> = records
            .iter()
            .filter(|r| r.compound.is_some())
            .map(|r| r.ticker.clone())
            .unique()
            .collect();
        let dates: Vec<NaiveDate> = sums
            .keys()
            .map(|(_, date)| *date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = tickers
            .iter()
            .map(|ticker| {
                dates
                    .iter()
                    .map(|date| {
                        sums.get(&(ticker.as_str(), *date))
                            .map(|(sum, count)| sum / *count as f64)
                    })
                    .collect()
            })
            .collect();

        Self {
            tickers,
            dates,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Mean score for one cell, `None` when no headline contributed.
    pub fn get(&self, ticker: &str, date: NaiveDate) -> Option<f64> {
        let t = self.tickers.iter().position(|t| t == ticker)?;
        let d = self.dates.iter().position(|d| *d == date)?;
        self.rows[t][d]
    }

    /// The column for `date`, one entry per ticker in row order.
    pub fn column(&self, date: NaiveDate) -> Option<Vec<Option<f64>>> {
        let d = self.dates.iter().position(|d| *d == date)?;
        Some(self.rows.iter().map(|row| row[d]).collect())
    }

    /// Number of populated (ticker, date) cells.
    pub fn group_count(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}
