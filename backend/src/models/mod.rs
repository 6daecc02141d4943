//! Models for the Stockcast server
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
