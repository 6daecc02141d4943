//! Temperature categories

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EngineError;

/// Ordered temperature band used to classify forecasts and to describe the
/// climate a product sells best in.
///
/// Declaration order is significant: it defines the ordinal used for
/// proximity scoring (Freezing < Cold < Mild < Hot).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureCategory {
    /// t <= 5
    Freezing,
    /// 5 < t <= 14
    Cold,
    /// 14 < t <= 24
    Mild,
    /// t > 24
    Hot,
}

impl TemperatureCategory {
    /// All categories in ordinal order
    pub const ALL: [TemperatureCategory; 4] = [
        TemperatureCategory::Freezing,
        TemperatureCategory::Cold,
        TemperatureCategory::Mild,
        TemperatureCategory::Hot,
    ];

    /// Position in the fixed order, 0 for Freezing through 3 for Hot
    pub fn ordinal(self) -> usize {
        match self {
            TemperatureCategory::Freezing => 0,
            TemperatureCategory::Cold => 1,
            TemperatureCategory::Mild => 2,
            TemperatureCategory::Hot => 3,
        }
    }

    /// Absolute difference between two ordinals
    pub fn distance(self, other: TemperatureCategory) -> usize {
        self.ordinal().abs_diff(other.ordinal())
    }

    /// Exclusive lower bound, `None` when unbounded below
    pub fn lower_bound(self) -> Option<Decimal> {
        match self {
            TemperatureCategory::Freezing => None,
            TemperatureCategory::Cold => TemperatureCategory::Freezing.upper_bound(),
            TemperatureCategory::Mild => TemperatureCategory::Cold.upper_bound(),
            TemperatureCategory::Hot => TemperatureCategory::Mild.upper_bound(),
        }
    }

    /// Inclusive upper bound, `None` when unbounded above
    pub fn upper_bound(self) -> Option<Decimal> {
        match self {
            TemperatureCategory::Freezing => Some(Decimal::from(5)),
            TemperatureCategory::Cold => Some(Decimal::from(14)),
            TemperatureCategory::Mild => Some(Decimal::from(24)),
            TemperatureCategory::Hot => None,
        }
    }

    /// Map a temperature (Celsius) to its category
    pub fn classify(temperature: Decimal) -> TemperatureCategory {
        if temperature <= Decimal::from(5) {
            TemperatureCategory::Freezing
        } else if temperature <= Decimal::from(14) {
            TemperatureCategory::Cold
        } else if temperature <= Decimal::from(24) {
            TemperatureCategory::Mild
        } else {
            TemperatureCategory::Hot
        }
    }

    /// Membership test from the category's own bounds. Must agree with
    /// [`TemperatureCategory::classify`] for every input.
    pub fn contains(self, temperature: Decimal) -> bool {
        let above_lower = self.lower_bound().map_or(true, |lower| temperature > lower);
        let within_upper = self.upper_bound().map_or(true, |upper| temperature <= upper);
        above_lower && within_upper
    }

    pub fn name(self) -> &'static str {
        match self {
            TemperatureCategory::Freezing => "Freezing",
            TemperatureCategory::Cold => "Cold",
            TemperatureCategory::Mild => "Mild",
            TemperatureCategory::Hot => "Hot",
        }
    }
}

impl std::fmt::Display for TemperatureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemperatureCategory {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();
        TemperatureCategory::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| {
                EngineError::validation(
                    "category",
                    format!(
                        "Unknown temperature category '{}'. Must be one of: freezing, cold, mild, hot",
                        normalized
                    ),
                )
            })
    }
}
