//! Text bar chart of the aggregate table.
//!
//! Dates run down the page; under each date every ticker gets one bar,
//! drawn outward from a zero axis so negative and positive scores read at a
//! glance:
//!
//! ```text
//! Sentiment Analysis for Each Company by Date
//!
//! Average Sentiment Score
//!       -1                  0                  +1
//! Date
//! 2026-01-05
//!   AAPL                    |████████          +0.4000
//!   TSLA              ██████|                  -0.3000
//!   AMZN                    |                  n/a
//!
//! Company: ■ AAPL  ■ TSLA  ■ AMZN
//! ```

use crate::aggregate::AggregateTable;
use colored::Colorize;
use std::fmt::Write;

pub const TITLE: &str = "Sentiment Analysis for Each Company by Date";
pub const X_LABEL: &str = "Date";
pub const Y_LABEL: &str = "Average Sentiment Score";
pub const LEGEND_TITLE: &str = "Company";

/// Series colors, assigned to tickers in row order and cycled.
/// Blue, green, red, orange, purple.
const PALETTE: [(u8, u8, u8); 5] = [
    (31, 119, 180),
    (44, 160, 44),
    (214, 39, 40),
    (255, 127, 14),
    (148, 103, 189),
];

const BLOCK: char = '█';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub color: bool,
    /// Characters for a full-scale (|score| = 1) bar on either side of zero.
    pub bar_width: usize,
}

pub fn render_chart(table: &AggregateTable, options: ChartOptions) -> String {
    let width = options.bar_width.max(1);
    let label_width = table.tickers().iter().map(String::len).max().unwrap_or(0);
    let indent = label_width + 4;
    let mut out = String::new();

    writeln!(out, "{}", paint_title(TITLE, options.color)).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "{Y_LABEL}").unwrap();
    writeln!(out, "{:indent$}{:<width$}0{:>width$}", "", "-1", "+1").unwrap();
    writeln!(out, "{X_LABEL}").unwrap();

    for date in table.dates() {
        writeln!(out, "{date}").unwrap();
        let column = table.column(*date).unwrap_or_default();
        for (index, (ticker, cell)) in table.tickers().iter().zip(column).enumerate() {
            let bar = match cell {
                Some(score) => {
                    let bar = diverging_bar(score, width);
                    let bar = paint(&bar, index, options.color);
                    format!("{bar}  {score:+.4}")
                }
                None => format!("{:width$}|{:width$}  n/a", "", ""),
            };
            writeln!(out, "  {ticker:<label_width$}  {bar}").unwrap();
        }
    }

    writeln!(out).unwrap();
    let legend = table
        .tickers()
        .iter()
        .enumerate()
        .map(|(index, ticker)| format!("{} {ticker}", paint("■", index, options.color)))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{LEGEND_TITLE}: {legend}").unwrap();
    out
}

/// A `2 * width + 1` character bar centered on a `|` zero mark.
fn diverging_bar(score: f64, width: usize) -> String {
    let filled = ((score.abs().min(1.0) * width as f64).round() as usize).min(width);
    let blocks: String = std::iter::repeat_n(BLOCK, filled).collect();
    if score < 0.0 {
        format!("{blocks:>width$}|{:width$}", "")
    } else {
        format!("{:width$}|{blocks:<width$}", "")
    }
}

fn paint(text: &str, series: usize, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    let (r, g, b) = PALETTE[series % PALETTE.len()];
    text.truecolor(r, g, b).to_string()
}

fn paint_title(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}
