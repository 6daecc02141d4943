//! External data integrations

pub mod forecast_feed;

pub use forecast_feed::ForecastFeed;
