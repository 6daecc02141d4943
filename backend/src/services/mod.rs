//! Business logic services for the Stockcast server

pub mod catalog;
pub mod forecast;
pub mod recommendation;

pub use catalog::CatalogService;
pub use forecast::{ForecastCache, ForecastProvider};
pub use recommendation::RecommendationService;
