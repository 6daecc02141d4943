//! HTTP handlers for the Stockcast API

pub mod catalog;
pub mod forecast;
pub mod health;
pub mod recommendation;

pub use catalog::*;
pub use forecast::*;
pub use health::*;
pub use recommendation::*;
