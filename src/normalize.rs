//! Conversion of raw table rows into dated [`NewsRecord`]s.
//!
//! Dates on the page are written as a month abbreviation and a day (`"Jan 5"`)
//! with no year. Every date is resolved against a [`RunContext`] captured once
//! when the pipeline is built, so all fallbacks within a run agree.
//!
//! # Year Boundary
//!
//! With [`YearAssumption::Current`] a headline dated `"Dec 30"` fetched on
//! January 2nd is placed in the current year, i.e. in the future. This mirrors
//! the source data's ambiguity; [`YearAssumption::Rollover`] is the opt-in
//! alternative that moves such dates back one year.

use crate::models::{DateToken, NewsRecord, RawHeadlineRow};
use chrono::{Datelike, Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Format of the date token, after the assumed year has been appended.
const DATE_FORMAT: &str = "%b %d %Y";

/// How a row with an absent or unparseable date gets its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFill {
    /// Use the run's fixed "today".
    #[default]
    Today,
    /// Reuse the last parsed date from the same ticker's table, or today if none.
    CarryForward,
}

/// Which year a parsed month/day lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YearAssumption {
    /// Always the year of the run's "today".
    #[default]
    Current,
    /// Current year, unless that puts the date after today; then the previous year.
    Rollover,
}

/// Values fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    pub today: NaiveDate,
    pub date_fill: DateFill,
    pub year_assumption: YearAssumption,
}

impl RunContext {
    /// Capture today's local date once.
    pub fn capture(date_fill: DateFill, year_assumption: YearAssumption) -> Self {
        Self {
            today: Local::now().date_naive(),
            date_fill,
            year_assumption,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    ctx: RunContext,
}

impl Normalizer {
    pub fn new(ctx: RunContext) -> Self {
        Self { ctx }
    }

    pub fn today(&self) -> NaiveDate {
        self.ctx.today
    }

    /// Classify a date token as parsed, absent, or malformed.
    pub fn classify(&self, token: Option<&str>) -> DateToken {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return DateToken::Absent;
        };

        let year = self.ctx.today.year();
        let Some(date) = parse_month_day(token, year) else {
            return DateToken::Malformed(token.to_string());
        };

        match self.ctx.year_assumption {
            YearAssumption::Current => DateToken::Parsed(date),
            YearAssumption::Rollover if date <= self.ctx.today => DateToken::Parsed(date),
            YearAssumption::Rollover => match parse_month_day(token, year - 1) {
                Some(previous) => DateToken::Parsed(previous),
                None => DateToken::Malformed(token.to_string()),
            },
        }
    }

    /// Resolve a single row. `carried` is the most recent parsed date seen
    /// earlier in the same table, consulted only under [`DateFill::CarryForward`].
    pub fn normalize(
        &self,
        ticker: &str,
        row: RawHeadlineRow,
        carried: Option<NaiveDate>,
    ) -> (NewsRecord, DateToken) {
        let token = self.classify(row.date_token.as_deref());
        let date = match (&token, self.ctx.date_fill) {
            (DateToken::Parsed(date), _) => *date,
            (_, DateFill::CarryForward) => carried.unwrap_or(self.ctx.today),
            (_, DateFill::Today) => self.ctx.today,
        };
        if let DateToken::Malformed(raw) = &token {
            debug!(%ticker, raw = %raw, %date, "Unparseable date token; using fallback");
        }

        let record = NewsRecord {
            ticker: ticker.to_string(),
            date,
            time: row.time_token,
            title: row.headline_text,
            compound: None,
        };
        (record, token)
    }

    /// Resolve every row of one ticker's table, in order.
    #[instrument(level = "debug", skip_all, fields(%ticker, rows = rows.len()))]
    pub fn normalize_table(&self, ticker: &str, rows: Vec<RawHeadlineRow>) -> Vec<NewsRecord> {
        let mut carried = None;
        rows.into_iter()
            .map(|row| {
                let (record, token) = self.normalize(ticker, row, carried);
                if let Some(date) = token.parsed() {
                    carried = Some(date);
                }
                record
            })
            .collect()
    }
}

fn parse_month_day(token: &str, year: i32) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{token} {year}"), DATE_FORMAT).ok()
}
