//! Shared types and the recommendation engine for Stockcast
//!
//! This crate contains the pure, synchronous part of the system: forecast
//! aggregation, temperature classification, seasonality evaluation, score
//! composition and ranking. It is used by the backend service and, through
//! WASM, by the storefront.

pub mod aggregation;
pub mod error;
pub mod models;
pub mod ranking;
pub mod scoring;
pub mod types;
pub mod validation;

pub use aggregation::*;
pub use error::*;
pub use models::*;
pub use ranking::*;
pub use scoring::*;
pub use types::*;
pub use validation::*;
