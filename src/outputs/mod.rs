//! Output generation for the aggregate table.
//!
//! # Submodules
//!
//! - [`chart`]: Text bar chart, one colored series per ticker
//! - [`json`]: The aggregate matrix as JSON
//!
//! Both formats print [`NO_DATA_MESSAGE`] instead when the table is empty.

pub mod chart;
pub mod json;

use crate::aggregate::AggregateTable;
use crate::config::{OutputFormat, Settings};
use chart::ChartOptions;
use chrono::NaiveDate;
use std::error::Error;

pub const NO_DATA_MESSAGE: &str = "No data available for plotting sentiment scores.";

/// Render `table` in the configured format.
pub fn render(
    table: &AggregateTable,
    settings: &Settings,
    today: NaiveDate,
) -> Result<String, Box<dyn Error>> {
    if table.is_empty() {
        return Ok(NO_DATA_MESSAGE.to_string());
    }
    match settings.format {
        OutputFormat::Chart => Ok(chart::render_chart(
            table,
            ChartOptions {
                color: settings.color,
                bar_width: settings.bar_width,
            },
        )),
        OutputFormat::Json => json::render_json(table, today),
    }
}
