//! Forecast aggregation
//!
//! Groups sub-daily forecast samples into one statistical summary per local
//! calendar date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{DailyForecastSummary, RawForecastSample};
use crate::types::round_half_up;

/// Maximum number of distinct days kept in an aggregated forecast
pub const FORECAST_HORIZON_DAYS: usize = 5;

/// Aggregate samples (in any order) into daily summaries.
///
/// Output is sorted ascending by date, holds at most one summary per date,
/// only covers dates that had at least one sample, and is truncated to the
/// first [`FORECAST_HORIZON_DAYS`] dates. Empty input gives empty output.
/// Sums that exceed the `Decimal` range fail with `DataUnavailable`.
pub fn aggregate_forecast(
    samples: &[RawForecastSample],
) -> EngineResult<Vec<DailyForecastSummary>> {
    // Buckets keep input order so mode ties go to the first value seen
    let mut buckets: BTreeMap<NaiveDate, Vec<&RawForecastSample>> = BTreeMap::new();
    for sample in samples {
        buckets.entry(sample.date()).or_default().push(sample);
    }

    buckets
        .into_iter()
        .take(FORECAST_HORIZON_DAYS)
        .map(|(date, day_samples)| summarize_day(date, &day_samples))
        .collect()
}

/// Parse a JSON array of samples
pub fn parse_samples(raw: &str) -> EngineResult<Vec<RawForecastSample>> {
    serde_json::from_str(raw).map_err(|e| {
        EngineError::data_unavailable(format!("Malformed forecast samples: {}", e))
    })
}

/// Parse a JSON array of samples and aggregate it. Malformed input is
/// `DataUnavailable`.
pub fn aggregate_forecast_json(raw: &str) -> EngineResult<Vec<DailyForecastSummary>> {
    let samples = parse_samples(raw)?;
    aggregate_forecast(&samples)
}

fn summarize_day(
    date: NaiveDate,
    samples: &[&RawForecastSample],
) -> EngineResult<DailyForecastSummary> {
    let count = Decimal::from(samples.len());

    let min_temp = samples.iter().map(|s| s.temperature).min().unwrap_or_default();
    let max_temp = samples.iter().map(|s| s.temperature).max().unwrap_or_default();
    let temp_sum = checked_sum(date, "temperature", samples.iter().map(|s| s.temperature))?;
    let feels_like_sum = checked_sum(date, "feels_like", samples.iter().map(|s| s.feels_like))?;
    let humidity_sum = checked_sum(
        date,
        "humidity_percent",
        samples.iter().map(|s| Decimal::from(s.humidity_percent)),
    )?;
    let wind_sum = checked_sum(
        date,
        "wind_speed_mps",
        samples.iter().map(|s| s.wind_speed_mps.unwrap_or(Decimal::ZERO)),
    )?;
    let total_rainfall = checked_sum(
        date,
        "rainfall_last_3h_mm",
        samples.iter().map(|s| s.rainfall_last_3h_mm.unwrap_or(Decimal::ZERO)),
    )?;

    Ok(DailyForecastSummary {
        date,
        min_temp: round_half_up(min_temp, 1),
        max_temp: round_half_up(max_temp, 1),
        avg_temp: round_half_up(temp_sum / count, 1),
        avg_feels_like: round_half_up(feels_like_sum / count, 1),
        avg_humidity: round_half_up(humidity_sum / count, 1),
        total_rainfall_mm: round_half_up(total_rainfall, 2),
        avg_wind_speed_mps: round_half_up(wind_sum / count, 1),
        dominant_description: mode(samples.iter().map(|s| s.weather_description.as_str())),
        dominant_icon: mode(samples.iter().map(|s| s.weather_icon.as_str())),
        sample_count: samples.len(),
    })
}

fn checked_sum(
    date: NaiveDate,
    field: &str,
    mut values: impl Iterator<Item = Decimal>,
) -> EngineResult<Decimal> {
    values
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
        .ok_or_else(|| {
            EngineError::data_unavailable(format!(
                "Forecast {} total for {} out of range",
                field, date
            ))
        })
}

/// Most frequent value; ties go to the value encountered first
fn mode<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some(entry) => entry.1 += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value.to_string()).unwrap_or_default()
}
