//! Data models for the dashboard.
//!
//! This module contains the input record types read from the CSV files,
//! the summary rows produced by the aggregator, and the `Dashboard`
//! value handed to the renderers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the daily table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Unique row identifier.
    pub instant: u32,
    /// Calendar day.
    pub dteday: NaiveDate,
    /// Season code (1-4).
    pub season: u8,
    /// Weather situation code.
    pub weathersit: u8,
    /// Rentals by non-registered users.
    pub casual: u64,
    /// Rentals by registered users.
    pub registered: u64,
    /// Total rentals.
    pub cnt: u64,
}

/// One row of the hourly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRecord {
    /// Unique row identifier.
    pub instant: u32,
    /// Calendar day.
    pub dteday: NaiveDate,
    /// Season code (1-4).
    pub season: u8,
    /// Hour of day (0-23).
    pub hr: u8,
    /// Weather situation code.
    pub weathersit: u8,
    /// Total rentals.
    pub cnt: u64,
}

/// Season of the year, decoded from the numeric season code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    /// A code outside 1-4; codes are not validated on load.
    Other(u8),
}

impl From<u8> for Season {
    fn from(code: u8) -> Self {
        match code {
            1 => Season::Spring,
            2 => Season::Summer,
            3 => Season::Fall,
            4 => Season::Winter,
            other => Season::Other(other),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Fall => write!(f, "Fall"),
            Season::Winter => write!(f, "Winter"),
            Season::Other(code) => write!(f, "Season {}", code),
        }
    }
}

/// Weather situation bucket, decoded from the `weathersit` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weather {
    Clear,
    Mist,
    LightPrecipitation,
    HeavyPrecipitation,
    Other(u8),
}

impl From<u8> for Weather {
    fn from(code: u8) -> Self {
        match code {
            1 => Weather::Clear,
            2 => Weather::Mist,
            3 => Weather::LightPrecipitation,
            4 => Weather::HeavyPrecipitation,
            other => Weather::Other(other),
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weather::Clear => write!(f, "Clear"),
            Weather::Mist => write!(f, "Mist"),
            Weather::LightPrecipitation => write!(f, "Light snow/rain"),
            Weather::HeavyPrecipitation => write!(f, "Heavy rain"),
            Weather::Other(code) => write!(f, "Weather {}", code),
        }
    }
}

/// Rentals per season.
///
/// `customer_count` is the number of *distinct* `cnt` values seen for the
/// season, not a sum of rentals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season: u8,
    pub customer_count: usize,
}

/// Rentals per hour of day, with the same distinct-count semantics as
/// [`SeasonSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourSummary {
    pub hr: u8,
    pub customer_count: usize,
}

/// Rentals per weather situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub weathersit: u8,
    /// Number of distinct `instant` values.
    pub distinct_day_count: usize,
    /// Sum of `cnt`.
    pub rental_sum: u64,
}

/// Headline metrics over the daily table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalTotals {
    pub total: u64,
    pub registered: u64,
    pub casual: u64,
}

/// One point of the casual vs registered line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySeriesPoint {
    pub dteday: NaiveDate,
    pub casual: u64,
    pub registered: u64,
}

/// Metadata about a generated dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetadata {
    /// Date and time the dashboard was generated.
    pub generated_at: DateTime<Utc>,
    /// Path of the daily CSV.
    pub day_source: String,
    /// Path of the hourly CSV.
    pub hour_source: String,
    /// Rows in the daily table.
    pub daily_rows: usize,
    /// Rows in the hourly table.
    pub hourly_rows: usize,
}

/// Everything the renderers need, computed once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub metadata: DashboardMetadata,
    pub totals: RentalTotals,
    /// Season summary, sorted by `customer_count` descending.
    pub by_season: Vec<SeasonSummary>,
    /// Hour summary, sorted by `customer_count` descending.
    pub by_hour: Vec<HourSummary>,
    /// Weather summary, sorted by `rental_sum` descending.
    pub by_weather: Vec<WeatherSummary>,
    /// Casual and registered rentals per day, in file order.
    pub daily_series: Vec<DailySeriesPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_from_code() {
        assert_eq!(Season::from(1), Season::Spring);
        assert_eq!(Season::from(4), Season::Winter);
        assert_eq!(Season::from(9), Season::Other(9));
    }

    #[test]
    fn test_season_display() {
        assert_eq!(Season::Fall.to_string(), "Fall");
        assert_eq!(Season::Other(0).to_string(), "Season 0");
    }

    #[test]
    fn test_weather_display() {
        assert_eq!(Weather::from(1).to_string(), "Clear");
        assert_eq!(Weather::from(3).to_string(), "Light snow/rain");
        assert_eq!(Weather::from(7).to_string(), "Weather 7");
    }

    #[test]
    fn test_daily_record_json_uses_iso_date() {
        let record = DailyRecord {
            instant: 1,
            dteday: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            season: 1,
            weathersit: 2,
            casual: 331,
            registered: 654,
            cnt: 985,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"dteday\":\"2011-01-01\""));
    }
}
