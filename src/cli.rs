//! Command-line interface definitions for Ticker Sentiment.
//!
//! Every option can also come from the YAML file passed with `--config`;
//! flags given here take precedence. The ticker list is fixed and cannot be
//! changed from the command line.

use crate::config::OutputFormat;
use crate::normalize::{DateFill, YearAssumption};
use clap::Parser;

/// Command-line arguments for the Ticker Sentiment application.
///
/// # Examples
///
/// ```sh
/// # Chart with the defaults
/// ticker_sentiment
///
/// # Machine-readable matrix, dateless rows inherit the previous row's date
/// ticker_sentiment --format json --date-fill carry-forward
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Quote page URL prefix; the ticker is appended to it
    #[arg(long, env = "FINVIZ_URL")]
    pub base_url: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long, env = "TICKER_SENTIMENT_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable ANSI colors in the chart
    #[arg(long)]
    pub no_color: bool,

    /// Width in characters of a full-scale bar
    #[arg(long)]
    pub bar_width: Option<usize>,

    /// Date given to rows whose date is missing or unparseable
    #[arg(long, value_enum)]
    pub date_fill: Option<DateFill>,

    /// Year assumed for "Mon DD" dates
    #[arg(long, value_enum)]
    pub year_assumption: Option<YearAssumption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["ticker_sentiment"]);
        assert_eq!(cli.config, None);
        assert_eq!(cli.format, None);
        assert!(!cli.no_color);
        assert_eq!(cli.date_fill, None);
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "ticker_sentiment",
            "--config",
            "./config.yaml",
            "--format",
            "json",
            "--no-color",
            "--bar-width",
            "30",
            "--date-fill",
            "carry-forward",
            "--year-assumption",
            "rollover",
        ]);

        assert_eq!(cli.config.as_deref(), Some("./config.yaml"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.no_color);
        assert_eq!(cli.bar_width, Some(30));
        assert_eq!(cli.date_fill, Some(DateFill::CarryForward));
        assert_eq!(cli.year_assumption, Some(YearAssumption::Rollover));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["ticker_sentiment", "-c", "/tmp/c.yaml", "-f", "chart"]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/c.yaml"));
        assert_eq!(cli.format, Some(OutputFormat::Chart));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["ticker_sentiment", "--format", "csv"]).is_err());
    }
}
