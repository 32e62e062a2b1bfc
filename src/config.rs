//! Run settings, merged from built-in defaults, an optional YAML file, and the CLI.
//!
//! # Precedence
//!
//! CLI flag > config file > default. Defaults reproduce a plain run against
//! Finviz with the `my-app` user agent, a colored chart, today-fill for
//! missing dates and the current-year assumption.
//!
//! # File Format
//!
//! ```yaml
//! base_url: "https://finviz.com/quote.ashx?t="
//! user_agent: "my-app"
//! format: chart
//! color: true
//! bar_width: 40
//! date_fill: today
//! year_assumption: current
//! ```

use crate::cli::Cli;
use crate::normalize::{DateFill, YearAssumption};
use crate::scrapers::finviz::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Text bar chart
    #[default]
    Chart,
    /// Aggregate matrix as JSON
    Json,
}

/// Contents of a config file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub format: Option<OutputFormat>,
    pub color: Option<bool>,
    pub bar_width: Option<usize>,
    pub date_fill: Option<DateFill>,
    pub year_assumption: Option<YearAssumption>,
}

impl FileConfig {
    /// Read and parse a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// contains unknown keys.
    #[instrument(level = "info")]
    pub async fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path).await?;
        let config: FileConfig = serde_yaml::from_str(&text)?;
        info!(?config, "Loaded configuration");
        Ok(config)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub user_agent: String,
    pub format: OutputFormat,
    pub color: bool,
    pub bar_width: usize,
    pub date_fill: DateFill,
    pub year_assumption: YearAssumption,
}

impl Settings {
    /// Load the config file named on the command line, if any, and merge.
    pub async fn from_cli(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path).await?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    pub fn merge(cli: &Cli, file: FileConfig) -> Self {
        Self {
            base_url: cli
                .base_url
                .clone()
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            user_agent: cli
                .user_agent
                .clone()
                .or(file.user_agent)
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            format: cli.format.or(file.format).unwrap_or_default(),
            color: !cli.no_color && file.color.unwrap_or(true),
            bar_width: cli
                .bar_width
                .or(file.bar_width)
                .unwrap_or(DEFAULT_BAR_WIDTH)
                .max(1),
            date_fill: cli.date_fill.or(file.date_fill).unwrap_or_default(),
            year_assumption: cli
                .year_assumption
                .or(file.year_assumption)
                .unwrap_or_default(),
        }
    }
}
