//! Dashboard assembly.

use super::aggregator::{
    daily_series, rental_totals, rentals_by_hour, rentals_by_season, rentals_by_weather,
    sort_hours_desc, sort_seasons_desc, sort_weather_desc,
};
use crate::data::Dataset;
use crate::models::{Dashboard, DashboardMetadata};
use chrono::Utc;
use tracing::debug;

/// Compute every summary the renderers show.
///
/// Season and hour rows come back sorted by customer count and weather
/// rows by rental sum, highest first.
pub fn build_dashboard(dataset: &Dataset) -> Dashboard {
    let mut by_season = rentals_by_season(&dataset.daily);
    sort_seasons_desc(&mut by_season);

    let mut by_hour = rentals_by_hour(&dataset.hourly);
    sort_hours_desc(&mut by_hour);

    let mut by_weather = rentals_by_weather(&dataset.daily);
    sort_weather_desc(&mut by_weather);

    debug!(
        "Summaries: {} seasons, {} hours, {} weather codes",
        by_season.len(),
        by_hour.len(),
        by_weather.len()
    );

    Dashboard {
        metadata: DashboardMetadata {
            generated_at: Utc::now(),
            day_source: dataset.day_source.display().to_string(),
            hour_source: dataset.hour_source.display().to_string(),
            daily_rows: dataset.daily.len(),
            hourly_rows: dataset.hourly.len(),
        },
        totals: rental_totals(&dataset.daily),
        by_season,
        by_hour,
        by_weather,
        daily_series: daily_series(&dataset.daily),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyRecord, HourlyRecord};
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let date = NaiveDate::from_ymd_opt(2012, 6, 1).unwrap();
        let daily = [(1, 1, 5), (2, 1, 5), (3, 2, 7), (4, 2, 9)]
            .into_iter()
            .map(|(instant, season, cnt)| DailyRecord {
                instant,
                dteday: date,
                season,
                weathersit: 1,
                casual: 1,
                registered: cnt - 1,
                cnt,
            })
            .collect();
        let hourly = [(0, 3), (17, 400), (17, 420), (8, 300)]
            .into_iter()
            .enumerate()
            .map(|(i, (hr, cnt))| HourlyRecord {
                instant: i as u32 + 1,
                dteday: date,
                season: 2,
                hr,
                weathersit: 1,
                cnt,
            })
            .collect();

        Dataset {
            daily,
            hourly,
            day_source: "day.csv".into(),
            hour_source: "hour.csv".into(),
        }
    }

    #[test]
    fn test_build_dashboard() {
        let dashboard = build_dashboard(&dataset());

        assert_eq!(dashboard.totals.total, 26);
        assert_eq!(dashboard.totals.casual, 4);
        assert_eq!(dashboard.totals.registered, 22);

        // season 2 has two distinct counts, season 1 only one
        assert_eq!(dashboard.by_season[0].season, 2);
        assert_eq!(dashboard.by_season[0].customer_count, 2);
        assert_eq!(dashboard.by_season[1].season, 1);

        assert_eq!(dashboard.by_hour[0].hr, 17);
        // ties keep ascending hour order
        assert_eq!(dashboard.by_hour[1].hr, 0);
        assert_eq!(dashboard.by_hour[2].hr, 8);

        assert_eq!(dashboard.by_weather.len(), 1);
        assert_eq!(dashboard.by_weather[0].distinct_day_count, 4);
        assert_eq!(dashboard.daily_series.len(), 4);
        assert_eq!(dashboard.metadata.daily_rows, 4);
        assert_eq!(dashboard.metadata.hour_source, "hour.csv");
    }

    #[test]
    fn test_build_dashboard_from_fixtures() {
        let fixtures = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let dataset = Dataset::load(
            &fixtures.join("day_data.csv"),
            &fixtures.join("hour_data.csv"),
            false,
        )
        .unwrap();

        let dashboard = build_dashboard(&dataset);

        let seasons: Vec<(u8, usize)> = dashboard
            .by_season
            .iter()
            .map(|s| (s.season, s.customer_count))
            .collect();
        assert_eq!(seasons, vec![(1, 5), (2, 2), (3, 2), (4, 1)]);

        let hours: Vec<u8> = dashboard.by_hour.iter().map(|h| h.hr).collect();
        assert_eq!(hours, vec![17, 0, 1, 2, 3, 4]);
        assert_eq!(dashboard.by_hour[0].customer_count, 3);

        let weather: Vec<(u8, usize, u64)> = dashboard
            .by_weather
            .iter()
            .map(|w| (w.weathersit, w.distinct_day_count, w.rental_sum))
            .collect();
        assert_eq!(weather, vec![(1, 5, 15_736), (2, 4, 6_265), (3, 1, 2_429)]);

        assert_eq!(dashboard.totals.total, 24_430);
        assert_eq!(dashboard.totals.casual, 5_897);
        assert_eq!(dashboard.totals.registered, 18_533);
    }

    #[test]
    fn test_build_dashboard_empty_dataset() {
        let dashboard = build_dashboard(&Dataset::default());

        assert!(dashboard.by_season.is_empty());
        assert!(dashboard.by_hour.is_empty());
        assert!(dashboard.by_weather.is_empty());
        assert_eq!(dashboard.totals.total, 0);
    }
}
