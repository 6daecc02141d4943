//! Forecast models

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One sub-daily forecast reading (typically at 3-hour granularity)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawForecastSample {
    /// Local wall-clock time at the forecast location
    pub timestamp: NaiveDateTime,
    pub temperature: Decimal,
    pub feels_like: Decimal,
    pub humidity_percent: i32,
    /// Rain over the preceding three hours in mm, absent when dry
    #[serde(default)]
    pub rainfall_last_3h_mm: Option<Decimal>,
    #[serde(default)]
    pub wind_speed_mps: Option<Decimal>,
    pub weather_description: String,
    pub weather_icon: String,
}

impl RawForecastSample {
    /// Calendar date of the sample in local time
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Statistical digest of all samples on one calendar date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecastSummary {
    pub date: NaiveDate,
    pub min_temp: Decimal,
    pub max_temp: Decimal,
    pub avg_temp: Decimal,
    pub avg_feels_like: Decimal,
    pub avg_humidity: Decimal,
    pub total_rainfall_mm: Decimal,
    pub avg_wind_speed_mps: Decimal,
    pub dominant_description: String,
    pub dominant_icon: String,
    /// Number of samples that fell on this date
    pub sample_count: usize,
}
