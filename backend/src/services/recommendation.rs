//! Recommendation service
//!
//! Validates raw request parameters, pulls the catalog and forecast
//! snapshots and hands them to the engine.

use chrono::NaiveDate;
use shared::{
    parse_category, parse_date, parse_month, DailyForecastSummary, DateRecommendations,
    LocationKey, Month, RecommendationEngine, RecommendationResult,
};
use std::sync::Arc;

use crate::error::AppResult;
use crate::services::{CatalogService, ForecastCache};
use crate::AppState;

/// Recommendation service for answering stock-up queries
#[derive(Clone)]
pub struct RecommendationService {
    engine: Arc<RecommendationEngine>,
    catalog: Arc<CatalogService>,
    forecasts: Arc<ForecastCache>,
    default_location: String,
}

impl RecommendationService {
    /// Create a new RecommendationService instance
    pub fn new(
        engine: Arc<RecommendationEngine>,
        catalog: Arc<CatalogService>,
        forecasts: Arc<ForecastCache>,
        default_location: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            catalog,
            forecasts,
            default_location: default_location.into(),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.engine.clone(),
            state.catalog.clone(),
            state.forecasts.clone(),
            state.config.forecast.default_location.clone(),
        )
    }

    /// Rank the whole catalog for a category. `month` defaults to the month
    /// of `today`.
    pub fn for_category(
        &self,
        category: Option<&str>,
        month: Option<&str>,
        today: NaiveDate,
    ) -> AppResult<Vec<RecommendationResult>> {
        let category = parse_category(category)?;
        let month = parse_month(month, Month::from_date(today))?;

        tracing::debug!("Ranking catalog for {} in {}", category, month);
        Ok(self
            .engine
            .recommend_for_category(self.catalog.as_ref(), category, month))
    }

    /// Rank only the products whose ideal category is `category`
    pub fn for_category_subset(
        &self,
        category: Option<&str>,
        month: Option<&str>,
        today: NaiveDate,
    ) -> AppResult<Vec<RecommendationResult>> {
        let category = parse_category(category)?;
        let month = parse_month(month, Month::from_date(today))?;

        Ok(self
            .engine
            .recommend_products_of_category(self.catalog.as_ref(), category, month))
    }

    /// Rank the catalog for a date using the location's forecast
    pub async fn for_date(
        &self,
        date: Option<&str>,
        location: Option<&str>,
    ) -> AppResult<DateRecommendations> {
        let date = parse_date(date)?;
        let location = self.location(location)?;

        let forecast = self.forecasts.get(&location).await?;
        let result = self
            .engine
            .recommend_for_date(self.catalog.as_ref(), &forecast, date);

        if let Some(resolution) = &result.resolution {
            if resolution.is_fallback {
                tracing::info!(
                    "Date {} outside forecast window for {}, using {}",
                    resolution.requested_date,
                    location,
                    resolution.forecast_date
                );
            }
        }

        Ok(result)
    }

    /// Aggregated daily forecast for a location
    pub async fn forecast(&self, location: Option<&str>) -> AppResult<Vec<DailyForecastSummary>> {
        let location = self.location(location)?;
        let forecast = self.forecasts.get(&location).await?;
        Ok(forecast.as_ref().clone())
    }

    fn location(&self, raw: Option<&str>) -> AppResult<LocationKey> {
        let raw = raw
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(&self.default_location);
        Ok(LocationKey::parse(raw)?)
    }
}
