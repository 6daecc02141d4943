//! HTTP handlers for aggregated forecasts

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::DailyForecastSummary;
use crate::services::RecommendationService;
use crate::AppState;

/// Query parameters for forecast lookups
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub location: Option<String>,
}

/// Get the daily forecast summaries for a location
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<Vec<DailyForecastSummary>>> {
    let service = RecommendationService::from_state(&state);
    let days = service.forecast(query.location.as_deref()).await?;
    Ok(Json(days))
}
