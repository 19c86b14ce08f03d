//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.bikeshare.toml` files.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".bikeshare.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Input data settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Chart and page settings.
    #[serde(default)]
    pub render: RenderConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            format: OutputFormat::default(),
        }
    }
}

fn default_output() -> String {
    "dashboard.html".to_string()
}

/// Input CSV locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Daily rentals CSV.
    #[serde(default = "default_day_path")]
    pub day_path: PathBuf,

    /// Hourly rentals CSV.
    #[serde(default = "default_hour_path")]
    pub hour_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            day_path: default_day_path(),
            hour_path: default_hour_path(),
        }
    }
}

fn default_day_path() -> PathBuf {
    PathBuf::from("Dashboard").join("day_data.csv")
}

fn default_hour_path() -> PathBuf {
    PathBuf::from("Dashboard").join("hour_data.csv")
}

/// How bar colours are assigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorBy {
    /// Colour follows the data value (season code, hour).
    #[default]
    Season,
    /// Colour follows the bar's position after sorting.
    Rank,
}

/// Chart and page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Page title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Colour assignment mode.
    #[serde(default)]
    pub color_by: ColorBy,

    /// Season bar colours. Indexed by season code minus one, or by sort
    /// position in rank mode.
    #[serde(default = "default_season_palette")]
    pub season_palette: Vec<String>,

    /// Colour of non-highlighted hour bars.
    #[serde(default = "default_base_color")]
    pub base_color: String,

    /// Colour of the highlighted hour bar.
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,

    /// Hour highlighted in season mode.
    #[serde(default = "default_highlight_hour")]
    pub highlight_hour: u8,

    /// Sort position highlighted in rank mode.
    #[serde(default = "default_highlight_rank")]
    pub highlight_rank: usize,

    /// Line colour for casual rentals.
    #[serde(default = "default_casual_color")]
    pub casual_color: String,

    /// Line colour for registered rentals.
    #[serde(default = "default_registered_color")]
    pub registered_color: String,

    /// Chart width in pixels.
    #[serde(default = "default_chart_width")]
    pub chart_width: u32,

    /// Chart height in pixels.
    #[serde(default = "default_chart_height")]
    pub chart_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            color_by: ColorBy::default(),
            season_palette: default_season_palette(),
            base_color: default_base_color(),
            highlight_color: default_highlight_color(),
            highlight_hour: default_highlight_hour(),
            highlight_rank: default_highlight_rank(),
            casual_color: default_casual_color(),
            registered_color: default_registered_color(),
            chart_width: default_chart_width(),
            chart_height: default_chart_height(),
        }
    }
}

fn default_title() -> String {
    "Bike Sharing Dashboard".to_string()
}

fn default_season_palette() -> Vec<String> {
    vec!["#FFFF00", "#FFA500", "#FF0000", "#D3D3D3"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_base_color() -> String {
    "#D3D3D3".to_string()
}

fn default_highlight_color() -> String {
    "#FF0000".to_string()
}

fn default_highlight_hour() -> u8 {
    17
}

fn default_highlight_rank() -> usize {
    17
}

fn default_casual_color() -> String {
    "#1F77B4".to_string()
}

fn default_registered_color() -> String {
    "#FF7F0E".to_string()
}

fn default_chart_width() -> u32 {
    960
}

fn default_chart_height() -> u32 {
    420
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings; only
    /// values given explicitly on the command line override.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref day) = args.day {
            self.data.day_path = day.clone();
        }
        if let Some(ref hour) = args.hour {
            self.data.hour_path = hour.clone();
        }

        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(format) = args.format {
            self.general.format = format;
        }

        if let Some(color_by) = args.color_by {
            self.render.color_by = color_by;
        }
        if let Some(hr) = args.highlight_hour {
            self.render.highlight_hour = hr;
        }
    }

    /// Check values that only make sense in a fixed range, after CLI
    /// arguments have been merged in.
    pub fn validate(&self) -> Result<()> {
        if self.render.highlight_hour > 23 {
            anyhow::bail!(
                "highlight_hour must be between 0 and 23, got {}",
                self.render.highlight_hour
            );
        }

        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
