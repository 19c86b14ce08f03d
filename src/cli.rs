//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::config::ColorBy;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bikeshare Dashboard - bike-sharing rental dashboard generator
///
/// Loads the daily and hourly rental tables, summarises them by season,
/// hour and weather, and renders a self-contained HTML dashboard.
///
/// Examples:
///   bikeshare-dashboard
///   bikeshare-dashboard --day data/day.csv --hour data/hour.csv -o out.html
///   bikeshare-dashboard --format json -o dashboard.json
///   bikeshare-dashboard --color-by rank
///   bikeshare-dashboard --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the daily rentals CSV
    ///
    /// Defaults to Dashboard/day_data.csv, or the [data] section of the config.
    #[arg(long, value_name = "FILE", env = "BIKESHARE_DAY_DATA")]
    pub day: Option<PathBuf>,

    /// Path to the hourly rentals CSV
    ///
    /// Defaults to Dashboard/hour_data.csv, or the [data] section of the config.
    #[arg(long, value_name = "FILE", env = "BIKESHARE_HOUR_DATA")]
    pub hour: Option<PathBuf>,

    /// Output file path for the dashboard
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (html, markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .bikeshare.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How chart bars are coloured
    ///
    /// `season` keys colours to the season code and hour value; `rank`
    /// reproduces the legacy colour-by-sort-position layout.
    #[arg(long, value_name = "MODE")]
    pub color_by: Option<ColorBy>,

    /// Hour (0-23) highlighted in the hourly chart
    #[arg(long, value_name = "HR")]
    pub highlight_hour: Option<u8>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .bikeshare.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the dashboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone HTML page with SVG charts (default)
    #[default]
    Html,
    /// Markdown tables
    Markdown,
    /// JSON
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(hr) = self.highlight_hour {
            if hr > 23 {
                return Err("Highlight hour must be between 0 and 23".to_string());
            }
        }

        for path in [&self.day, &self.hour].into_iter().flatten() {
            if path.is_dir() {
                return Err(format!("Data path is a directory: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            day: None,
            hour: None,
            output: None,
            format: None,
            config: None,
            color_by: None,
            highlight_hour: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "bikeshare-dashboard",
            "--day",
            "d.csv",
            "--format",
            "json",
            "--color-by",
            "rank",
            "--highlight-hour",
            "8",
        ])
        .unwrap();

        assert_eq!(args.day, Some(PathBuf::from("d.csv")));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.color_by, Some(ColorBy::Rank));
        assert_eq!(args.highlight_hour, Some(8));
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_highlight_hour_range() {
        let mut args = make_args();
        args.highlight_hour = Some(24);
        assert!(args.validate().is_err());

        args.highlight_hour = Some(23);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
