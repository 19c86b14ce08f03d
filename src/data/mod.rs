//! CSV loading for the daily and hourly rental tables.
//!
//! Both tables are read once at startup into a [`Dataset`], which is then
//! passed by reference to everything downstream.

use crate::models::{DailyRecord, HourlyRecord};
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading a table.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A header or row could not be read or decoded (missing column,
    /// unparsable value).
    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// The two rental tables, immutable after load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
    pub day_source: PathBuf,
    pub hour_source: PathBuf,
}

impl Dataset {
    /// Load both tables. Shows a spinner unless `show_progress` is false.
    pub fn load(day_path: &Path, hour_path: &Path, show_progress: bool) -> Result<Self, DataError> {
        let spinner = if show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        if let Some(ref pb) = spinner {
            pb.set_message(format!("Loading {}", day_path.display()));
        }
        let daily = load_daily(day_path)?;

        if let Some(ref pb) = spinner {
            pb.set_message(format!("Loading {}", hour_path.display()));
        }
        let hourly = load_hourly(hour_path)?;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        Ok(Self {
            daily,
            hourly,
            day_source: day_path.to_path_buf(),
            hour_source: hour_path.to_path_buf(),
        })
    }
}

/// Load the daily table.
pub fn load_daily(path: &Path) -> Result<Vec<DailyRecord>, DataError> {
    let rows = read_table(path)?;
    info!("Loaded {} daily rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load the hourly table.
pub fn load_hourly(path: &Path) -> Result<Vec<HourlyRecord>, DataError> {
    let rows = read_table(path)?;
    info!("Loaded {} hourly rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Deserialize every row of a headed CSV file. Columns not named by `T`
/// are ignored.
fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DataError> {
    let file = File::open(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers().map_err(|source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("{} columns: {:?}", path.display(), headers);

    reader
        .deserialize()
        .map(|row| {
            row.map_err(|source| DataError::Csv {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DAY_HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_daily_ignores_extra_columns() {
        let file = write_csv(&format!(
            "{}\n1,2011-01-01,1,0,1,0,6,0,2,0.344167,0.363625,0.805833,0.160446,331,654,985\n\
             2,2011-01-02,1,0,1,0,0,0,2,0.363478,0.353739,0.696087,0.248539,131,670,801\n",
            DAY_HEADER
        ));

        let rows = load_daily(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].instant, 1);
        assert_eq!(rows[0].weathersit, 2);
        assert_eq!(rows[0].cnt, 985);
        assert_eq!(rows[1].casual, 131);
        assert_eq!(rows[1].dteday.to_string(), "2011-01-02");
    }

    #[test]
    fn test_header_only_file_is_empty_table() {
        let file = write_csv(&format!("{}\n", DAY_HEADER));

        let rows = load_daily(file.path()).unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let file = write_csv("instant,dteday,season,weathersit,cnt\n1,2011-01-01,1,1,5\n");

        let err = load_daily(file.path()).unwrap_err();

        assert!(matches!(err, DataError::Csv { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_hourly(Path::new("does/not/exist.csv")).unwrap_err();

        assert!(matches!(err, DataError::Open { .. }));
    }

    #[test]
    fn test_dataset_load() {
        let day = write_csv(&format!(
            "{}\n1,2011-01-01,1,0,1,0,6,0,2,0.3,0.3,0.8,0.1,331,654,985\n",
            DAY_HEADER
        ));
        let hour = write_csv(
            "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt\n\
             1,2011-01-01,1,0,1,0,0,6,0,1,0.24,0.2879,0.81,0,3,13,16\n\
             2,2011-01-01,1,0,1,1,0,6,0,1,0.22,0.2727,0.8,0,8,32,40\n",
        );

        let dataset = Dataset::load(day.path(), hour.path(), false).unwrap();

        assert_eq!(dataset.daily.len(), 1);
        assert_eq!(dataset.hourly.len(), 2);
        assert_eq!(dataset.hourly[1].hr, 1);
        assert_eq!(dataset.hourly[1].cnt, 40);
        assert_eq!(dataset.day_source, day.path());
    }
}
