//! Route definitions for the Stockcast API

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog inspection
        .nest("/products", product_routes())
        // Aggregated forecast
        .route("/forecast", get(handlers::get_forecast))
        // Recommendations
        .nest("/recommendations", recommendation_routes())
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products))
        .route("/:product_id", get(handlers::get_product))
}

/// Recommendation routes
fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_recommendations))
        .route("/by-date", get(handlers::get_recommendations_by_date))
        .route(
            "/categories/:category",
            get(handlers::get_recommendations_for_category),
        )
}
