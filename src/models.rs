//! Data models for scraped headlines and their normalized representations.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawHeadlineRow`]: One row of a ticker's news table, before normalization
//! - [`DateToken`]: Classification of the row's date token
//! - [`NewsRecord`]: A normalized, scorable headline bound to a ticker and a date
//! - [`TickerOutcome`]: What happened to a ticker during a run
//!
//! The fixed ticker list also lives here, since it is part of the data model
//! rather than configuration.

use chrono::NaiveDate;
use std::fmt;

/// Tickers scraped on every run, in processing order.
pub const TICKERS: [&str; 5] = ["AMZN", "GOOG", "META", "AAPL", "TSLA"];

/// A single row of a news table as it appears in the page markup.
///
/// The date/time cell is kept split into tokens: the page omits the date for
/// consecutive rows published on the same day, so `date_token` is `None`
/// whenever the cell held a lone time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeadlineRow {
    /// Text content of the row's link element.
    pub headline_text: String,
    /// Everything before the time token, e.g. `"Jan 05"`.
    pub date_token: Option<String>,
    /// Time token, carried through unparsed. Empty cells yield `None`.
    pub time_token: Option<String>,
}

impl RawHeadlineRow {
    /// Split a raw date/time cell into date and time tokens.
    ///
    /// One token is a time with no date; two or more tokens are date then time.
    /// A month-and-day date written with a space (`"Jan 05 09:00AM"`) is kept
    /// together as the date token.
    pub fn from_cell(headline_text: impl Into<String>, cell_text: &str) -> Self {
        let tokens: Vec<&str> = cell_text.split_whitespace().collect();
        let (date_token, time_token) = match tokens.as_slice() {
            [] => (None, None),
            [time] => (None, Some((*time).to_string())),
            [date, time] => (Some((*date).to_string()), Some((*time).to_string())),
            [date @ .., time] => (Some(date.join(" ")), Some((*time).to_string())),
        };
        Self {
            headline_text: headline_text.into(),
            date_token,
            time_token,
        }
    }
}

/// Outcome of interpreting a row's date token.
///
/// `Absent` and `Malformed` both fall back to the same date; keeping them
/// apart makes the cases visible in logs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateToken {
    Parsed(NaiveDate),
    Absent,
    Malformed(String),
}

impl DateToken {
    pub fn parsed(&self) -> Option<NaiveDate> {
        match self {
            DateToken::Parsed(date) => Some(*date),
            DateToken::Absent | DateToken::Malformed(_) => None,
        }
    }
}

/// A headline bound to its ticker and a resolved calendar date.
///
/// `compound` is `None` until the record has been scored, and is set exactly
/// once through [`NewsRecord::with_compound`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewsRecord {
    pub ticker: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub title: String,
    pub compound: Option<f64>,
}

impl NewsRecord {
    /// Consume an unscored record and return it with its sentiment score attached.
    pub fn with_compound(self, compound: f64) -> Self {
        debug_assert!(self.compound.is_none(), "record scored twice");
        Self {
            compound: Some(compound),
            ..self
        }
    }
}

/// Per-ticker result of the fetch and extraction stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerOutcome {
    /// Page fetched and a news table found.
    Fetched { rows: usize, skipped: usize },
    /// Page fetched but it carried no news table.
    NoTable,
    /// Transport error or non-success status.
    FetchFailed { reason: String },
}

impl fmt::Display for TickerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickerOutcome::Fetched { rows, skipped } => {
                write!(f, "fetched ({rows} rows, {skipped} skipped)")
            }
            TickerOutcome::NoTable => write!(f, "no news table"),
            TickerOutcome::FetchFailed { reason } => write!(f, "fetch failed: {reason}"),
        }
    }
}
