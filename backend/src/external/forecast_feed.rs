//! Forecast feed backed by stored OpenWeatherMap payloads
//!
//! An upstream job drops the raw 5 day / 3 hour forecast response for each
//! location into `<data_dir>/<location>.json`. This module reads and converts
//! those payloads into engine samples; it never talks to the network.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{LocationKey, RawForecastSample};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::services::forecast::ForecastProvider;

/// File-backed forecast source
#[derive(Debug, Clone)]
pub struct ForecastFeed {
    data_dir: PathBuf,
}

/// OpenWeatherMap forecast payload
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    city: OWMCity,
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMCity {
    #[serde(default)]
    name: String,
    /// Offset from UTC in seconds
    #[serde(default)]
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    #[serde(default)]
    weather: Vec<OWMWeather>,
    wind: Option<OWMWind>,
    rain: Option<OWMForecastRain>,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    feels_like: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OWMForecastRain {
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl ForecastFeed {
    /// Create a feed reading from `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn payload_path(&self, location: &LocationKey) -> PathBuf {
        self.data_dir.join(format!("{}.json", location))
    }

    /// Read and convert the stored payload for a location
    pub async fn load(&self, location: &LocationKey) -> AppResult<Vec<RawForecastSample>> {
        let path = self.payload_path(location);
        let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
            AppError::DataUnavailable(format!(
                "Cannot read forecast for {} at {}: {}",
                location,
                path.display(),
                e
            ))
        })?;

        let samples = parse_payload(&raw)?;
        tracing::debug!("Loaded {} forecast samples for {}", samples.len(), location);
        Ok(samples)
    }
}

#[async_trait]
impl ForecastProvider for ForecastFeed {
    async fn fetch(&self, location: &LocationKey) -> AppResult<Vec<RawForecastSample>> {
        self.load(location).await
    }
}

/// Convert an OpenWeatherMap forecast payload to samples in local time
pub fn parse_payload(raw: &str) -> AppResult<Vec<RawForecastSample>> {
    let data: OWMForecastResponse = serde_json::from_str(raw).map_err(|e| {
        AppError::DataUnavailable(format!("Failed to parse forecast payload: {}", e))
    })?;

    tracing::trace!(
        "Converting {} forecast items for '{}'",
        data.list.len(),
        data.city.name
    );

    data.list
        .into_iter()
        .map(|item| convert_item(item, data.city.timezone))
        .collect()
}

fn convert_item(item: OWMForecastItem, timezone_offset: i64) -> AppResult<RawForecastSample> {
    let weather = item.weather.first();

    Ok(RawForecastSample {
        timestamp: local_time(item.dt, timezone_offset)?,
        temperature: to_decimal(item.main.temp, "temp")?,
        feels_like: to_decimal(item.main.feels_like, "feels_like")?,
        humidity_percent: item.main.humidity,
        rainfall_last_3h_mm: item
            .rain
            .and_then(|r| r.three_hour)
            .map(|v| to_decimal(v, "rain.3h"))
            .transpose()?,
        wind_speed_mps: item
            .wind
            .and_then(|w| w.speed)
            .map(|v| to_decimal(v, "wind.speed"))
            .transpose()?,
        weather_description: weather.map(|w| w.description.clone()).unwrap_or_default(),
        weather_icon: weather.map(|w| w.icon.clone()).unwrap_or_default(),
    })
}

fn local_time(unix_seconds: i64, offset_seconds: i64) -> AppResult<NaiveDateTime> {
    DateTime::from_timestamp(unix_seconds + offset_seconds, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| {
            AppError::DataUnavailable(format!("Forecast timestamp {} out of range", unix_seconds))
        })
}

fn to_decimal(value: f64, field: &str) -> AppResult<Decimal> {
    Decimal::try_from(value).map_err(|_| {
        AppError::DataUnavailable(format!("Forecast field {} is not a number: {}", field, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    const PAYLOAD: &str = r#"{
        "city": {"name": "Bangkok", "timezone": 25200},
        "list": [
            {"dt": 1784016000, "main": {"temp": 29.4, "feels_like": 33.1, "humidity": 74},
             "weather": [{"description": "light rain", "icon": "10d"}],
             "wind": {"speed": 3.6}, "rain": {"3h": 0.42}},
            {"dt": 1784026800, "main": {"temp": 27.0, "feels_like": 30.2, "humidity": 80},
             "weather": [{"description": "overcast clouds", "icon": "04n"}]}
        ]
    }"#;

    #[test]
    fn test_parse_payload_converts_to_local_time() {
        let samples = parse_payload(PAYLOAD).unwrap();
        assert_eq!(samples.len(), 2);

        // 1784016000 is 2026-07-14 08:00 UTC, 15:00 in Bangkok (UTC+7)
        let expected = NaiveDate::from_ymd_opt(2026, 7, 14)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        assert_eq!(samples[0].timestamp, expected);
        assert_eq!(samples[0].temperature, Decimal::from_str("29.4").unwrap());
        assert_eq!(samples[0].rainfall_last_3h_mm, Some(Decimal::from_str("0.42").unwrap()));
        assert_eq!(samples[0].weather_description, "light rain");
    }

    #[test]
    fn test_missing_rain_and_wind_stay_absent() {
        let samples = parse_payload(PAYLOAD).unwrap();
        assert_eq!(samples[1].rainfall_last_3h_mm, None);
        assert_eq!(samples[1].wind_speed_mps, None);
    }

    #[test]
    fn test_malformed_payload_is_data_unavailable() {
        assert!(matches!(
            parse_payload("{\"list\": 42}"),
            Err(AppError::DataUnavailable(_))
        ));
        assert!(matches!(parse_payload("not json"), Err(AppError::DataUnavailable(_))));
    }

    #[tokio::test]
    async fn test_load_reads_location_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bangkok.json"), PAYLOAD).unwrap();

        let feed = ForecastFeed::new(dir.path());
        let location = LocationKey::parse("bangkok").unwrap();
        let samples = tokio_test::assert_ok!(feed.fetch(&location).await);
        assert_eq!(samples.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_location_file_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let feed = ForecastFeed::new(dir.path());
        let location = LocationKey::parse("nowhere").unwrap();
        let err = tokio_test::assert_err!(feed.fetch(&location).await);
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }
}
