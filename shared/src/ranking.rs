//! Recommendation ranking
//!
//! Applies the scoring rules across a catalog snapshot and orders the
//! results. Everything here is synchronous and read-only; one engine can be
//! shared between any number of concurrent callers.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    DailyForecastSummary, DateRecommendations, DateResolution, Month, Product,
    RecommendationResult, TemperatureCategory,
};
use crate::scoring::ScoringConfig;

/// Read-only source of the product catalog
pub trait ProductCatalogProvider: Send + Sync {
    /// Every product in catalog order. May be empty.
    fn list_all(&self) -> Vec<Product>;
}

impl ProductCatalogProvider for Vec<Product> {
    fn list_all(&self) -> Vec<Product> {
        self.clone()
    }
}

/// Scores and ranks products against a temperature category and month
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    scoring: ScoringConfig,
}

impl RecommendationEngine {
    /// Create an engine, rejecting an inconsistent scoring configuration
    pub fn new(scoring: ScoringConfig) -> EngineResult<Self> {
        scoring.validate()?;
        Ok(Self { scoring })
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Score every product and sort by descending score. Ties keep catalog
    /// order (the sort is stable).
    pub fn rank(
        &self,
        products: &[Product],
        category: TemperatureCategory,
        month: Month,
    ) -> Vec<RecommendationResult> {
        let mut results: Vec<RecommendationResult> = products
            .iter()
            .map(|product| self.scoring.score_product(product, category, month))
            .collect();
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results
    }

    /// Recommendations for a category across the whole catalog
    pub fn recommend_for_category(
        &self,
        catalog: &dyn ProductCatalogProvider,
        category: TemperatureCategory,
        month: Month,
    ) -> Vec<RecommendationResult> {
        self.rank(&catalog.list_all(), category, month)
    }

    /// Recommendations restricted to products whose ideal category is `category`
    pub fn recommend_products_of_category(
        &self,
        catalog: &dyn ProductCatalogProvider,
        category: TemperatureCategory,
        month: Month,
    ) -> Vec<RecommendationResult> {
        let products: Vec<Product> = catalog
            .list_all()
            .into_iter()
            .filter(|product| product.ideal_category == category)
            .collect();
        self.rank(&products, category, month)
    }

    /// Recommendations for a calendar date using the forecast window.
    ///
    /// The target category comes from the matching day's average feels-like
    /// temperature and the month from `date`. A date outside the window falls
    /// back to the first available day; the returned resolution reports it.
    /// An empty window gives no resolution and no recommendations.
    pub fn recommend_for_date(
        &self,
        catalog: &dyn ProductCatalogProvider,
        forecast: &[DailyForecastSummary],
        date: NaiveDate,
    ) -> DateRecommendations {
        let Some(resolution) = resolve_date(forecast, date) else {
            return DateRecommendations {
                resolution: None,
                recommendations: Vec::new(),
            };
        };

        let recommendations =
            self.recommend_for_category(catalog, resolution.category, resolution.month);

        DateRecommendations {
            resolution: Some(resolution),
            recommendations,
        }
    }
}

/// Resolve a date against a forecast window: exact match first, otherwise
/// the first summary in the window.
pub fn resolve_date(forecast: &[DailyForecastSummary], date: NaiveDate) -> Option<DateResolution> {
    let exact = forecast.iter().find(|day| day.date == date);
    let (day, is_fallback) = match exact {
        Some(day) => (day, false),
        None => (forecast.first()?, true),
    };

    Some(DateResolution {
        requested_date: date,
        forecast_date: day.date,
        is_fallback,
        category: TemperatureCategory::classify(day.avg_feels_like),
        month: Month::from_date(date),
    })
}
