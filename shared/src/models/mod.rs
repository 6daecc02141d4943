//! Domain models for Stockcast

mod calendar;
mod climate;
mod forecast;
mod product;
mod recommendation;

pub use calendar::*;
pub use climate::*;
pub use forecast::*;
pub use product::*;
pub use recommendation::*;
