//! Recommendation models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Month, TemperatureCategory};

/// Seasonal standing of a product in a month
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalityTier {
    Peak,
    Neutral,
    Low,
}

/// Qualitative label derived from a final score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecommendationTag {
    Good,
    Medium,
    Poor,
}

impl std::fmt::Display for RecommendationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationTag::Good => write!(f, "Good"),
            RecommendationTag::Medium => write!(f, "Medium"),
            RecommendationTag::Poor => write!(f, "Poor"),
        }
    }
}

/// Score of one product for one (category, month) query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub product_id: Uuid,
    pub name: String,
    /// The product's ideal temperature category
    pub category: TemperatureCategory,
    /// Rounded to 2 decimal places
    pub score: Decimal,
    pub tag: RecommendationTag,
}

/// Which forecast day answered a by-date query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateResolution {
    pub requested_date: NaiveDate,
    pub forecast_date: NaiveDate,
    /// True when `requested_date` was outside the forecast window and the
    /// first available day was used instead
    pub is_fallback: bool,
    pub category: TemperatureCategory,
    pub month: Month,
}

/// Result of a by-date query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateRecommendations {
    /// `None` when the forecast window was empty
    pub resolution: Option<DateResolution>,
    pub recommendations: Vec<RecommendationResult>,
}
