//! Stockcast - Backend Server
//!
//! Recommends which perishable products a retailer should stock up or down
//! on, from the short-range weather forecast and each product's seasonal
//! sales pattern.

use axum::{routing::get, Router};
use shared::RecommendationEngine;
use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod models;
mod routes;
mod services;

pub use config::Config;

use external::ForecastFeed;
use services::{CatalogService, ForecastCache};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<RecommendationEngine>,
    pub catalog: Arc<CatalogService>,
    pub forecasts: Arc<ForecastCache>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockcast_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Stockcast Server");
    tracing::info!("Environment: {}", config.environment);

    let engine = RecommendationEngine::new(config.scoring.clone())?;
    let max_score = engine.scoring().max_score();
    if max_score < engine.scoring().good_threshold {
        tracing::warn!(
            "Highest reachable score is {} but the Good threshold is {}; no product will be tagged Good",
            max_score,
            engine.scoring().good_threshold
        );
    }

    let catalog = CatalogService::load(Path::new(&config.catalog.path))?;

    let feed = ForecastFeed::new(&config.forecast.data_dir);
    tracing::info!("Reading forecasts from {}", feed.data_dir().display());
    let forecasts = ForecastCache::new(
        Arc::new(feed),
        Duration::from_secs(config.forecast.cache_ttl_seconds),
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        engine: Arc::new(engine),
        catalog: Arc::new(catalog),
        forecasts: Arc::new(forecasts),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Stockcast API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
