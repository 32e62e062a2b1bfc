//! JSON rendering of the aggregate table.
//!
//! The matrix is written as-is: `rows[t][d]` is the mean score of
//! `tickers[t]` on `dates[d]`, or `null` when that ticker had no headline
//! that day.
//!
//! ```json
//! {
//!   "today": "2026-10-16",
//!   "tickers": ["AAPL", "TSLA"],
//!   "dates": ["2026-01-05", "2026-01-06"],
//!   "rows": [[0.4, null], [null, -0.3]]
//! }
//! ```

use crate::aggregate::AggregateTable;
use chrono::NaiveDate;
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct JsonReport<'a> {
    today: NaiveDate,
    #[serde(flatten)]
    aggregate: &'a AggregateTable,
}

/// Serialize the table, stamped with the run's date.
pub fn render_json(table: &AggregateTable, today: NaiveDate) -> Result<String, Box<dyn Error>> {
    let report = JsonReport {
        today,
        aggregate: table,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsRecord;
    use serde_json::{Value, json};

    #[test]
    fn test_render_json() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let records = vec![
            NewsRecord {
                ticker: "AAPL".to_string(),
                date: day,
                time: Some("09:00AM".to_string()),
                title: "Stock rises".to_string(),
                compound: Some(0.5),
            },
            NewsRecord {
                ticker: "TSLA".to_string(),
                date: day.succ_opt().unwrap(),
                time: None,
                title: "Sales slump".to_string(),
                compound: Some(-0.25),
            },
        ];
        let table = AggregateTable::from_records(&records);
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        let value: Value = serde_json::from_str(&render_json(&table, today).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "today": "2026-10-16",
                "tickers": ["AAPL", "TSLA"],
                "dates": ["2026-01-05", "2026-01-06"],
                "rows": [[0.5, null], [null, -0.25]]
            })
        );
    }
}
