//! Rental aggregation and statistics.
//!
//! This module reduces the daily and hourly tables to one row per
//! distinct grouping key. Groups are emitted in ascending key order and
//! only for keys present in the input, so an empty table yields an empty
//! summary.

use crate::models::{
    DailyRecord, DailySeriesPoint, HourSummary, HourlyRecord, RentalTotals, SeasonSummary,
    WeatherSummary,
};
use std::collections::{BTreeMap, HashSet};

/// Count distinct `value`s per `key`, keyed in ascending order.
fn count_distinct_by<T, K, V>(
    rows: &[T],
    key: impl Fn(&T) -> K,
    value: impl Fn(&T) -> V,
) -> BTreeMap<K, usize>
where
    K: Ord,
    V: Eq + std::hash::Hash,
{
    let mut groups: BTreeMap<K, HashSet<V>> = BTreeMap::new();

    for row in rows {
        groups.entry(key(row)).or_default().insert(value(row));
    }

    groups
        .into_iter()
        .map(|(k, values)| (k, values.len()))
        .collect()
}

/// Group daily rows by season, counting distinct `cnt` values.
pub fn rentals_by_season(daily: &[DailyRecord]) -> Vec<SeasonSummary> {
    count_distinct_by(daily, |r| r.season, |r| r.cnt)
        .into_iter()
        .map(|(season, customer_count)| SeasonSummary {
            season,
            customer_count,
        })
        .collect()
}

/// Group hourly rows by hour of day, counting distinct `cnt` values.
pub fn rentals_by_hour(hourly: &[HourlyRecord]) -> Vec<HourSummary> {
    count_distinct_by(hourly, |r| r.hr, |r| r.cnt)
        .into_iter()
        .map(|(hr, customer_count)| HourSummary { hr, customer_count })
        .collect()
}

/// Group daily rows by weather situation: distinct day identifiers and
/// summed rentals.
pub fn rentals_by_weather(daily: &[DailyRecord]) -> Vec<WeatherSummary> {
    let mut groups: BTreeMap<u8, (HashSet<u32>, u64)> = BTreeMap::new();

    for record in daily {
        let (days, sum) = groups.entry(record.weathersit).or_default();
        days.insert(record.instant);
        *sum += record.cnt;
    }

    groups
        .into_iter()
        .map(|(weathersit, (days, rental_sum))| WeatherSummary {
            weathersit,
            distinct_day_count: days.len(),
            rental_sum,
        })
        .collect()
}

/// Sum total, registered and casual rentals over the daily table.
pub fn rental_totals(daily: &[DailyRecord]) -> RentalTotals {
    daily.iter().fold(RentalTotals::default(), |mut acc, r| {
        acc.total += r.cnt;
        acc.registered += r.registered;
        acc.casual += r.casual;
        acc
    })
}

/// Casual and registered rentals per day, in table order.
pub fn daily_series(daily: &[DailyRecord]) -> Vec<DailySeriesPoint> {
    daily
        .iter()
        .map(|r| DailySeriesPoint {
            dteday: r.dteday,
            casual: r.casual,
            registered: r.registered,
        })
        .collect()
}

/// Sort season rows by customer count (highest first). Ties keep their
/// current order.
pub fn sort_seasons_desc(rows: &mut [SeasonSummary]) {
    rows.sort_by(|a, b| b.customer_count.cmp(&a.customer_count));
}

/// Sort hour rows by customer count (highest first). Ties keep their
/// current order.
pub fn sort_hours_desc(rows: &mut [HourSummary]) {
    rows.sort_by(|a, b| b.customer_count.cmp(&a.customer_count));
}

/// Sort weather rows by rental sum (highest first). Ties keep their
/// current order.
pub fn sort_weather_desc(rows: &mut [WeatherSummary]) {
    rows.sort_by(|a, b| b.rental_sum.cmp(&a.rental_sum));
}
