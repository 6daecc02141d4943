//! HTTP handlers for stock recommendations
//!
//! Parameters are taken as raw strings so that malformed values surface as
//! validation errors from the engine rather than as extractor rejections.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{DateRecommendations, RecommendationResult};
use crate::services::RecommendationService;
use crate::AppState;

/// Query parameters for category recommendations
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
    /// Month number (1-12), defaults to the current month
    pub month: Option<String>,
}

/// Query parameters for month-only filters
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

/// Query parameters for date recommendations
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
    pub location: Option<String>,
}

/// Rank the whole catalog for a temperature category
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<Vec<RecommendationResult>>> {
    let service = RecommendationService::from_state(&state);
    let results = service.for_category(
        query.category.as_deref(),
        query.month.as_deref(),
        Local::now().date_naive(),
    )?;
    Ok(Json(results))
}

/// Rank the products whose ideal category is the given one
pub async fn get_recommendations_for_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<Vec<RecommendationResult>>> {
    let service = RecommendationService::from_state(&state);
    let results = service.for_category_subset(
        Some(&category),
        query.month.as_deref(),
        Local::now().date_naive(),
    )?;
    Ok(Json(results))
}

/// Rank the catalog for a calendar date using the forecast
pub async fn get_recommendations_by_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<DateRecommendations>> {
    let service = RecommendationService::from_state(&state);
    let result = service
        .for_date(query.date.as_deref(), query.location.as_deref())
        .await?;
    Ok(Json(result))
}
