//! Common types used across the platform

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Round half-up (away from zero on a tie) to `dp` decimal places
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Key identifying a forecast location (e.g. "bangkok", "store-042")
///
/// Restricted to ASCII letters, digits, `-` and `_` so it can double as a
/// file name or cache key without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationKey(String);

impl LocationKey {
    pub const MAX_LEN: usize = 64;

    pub fn parse(raw: &str) -> EngineResult<Self> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(EngineError::validation("location", "Location key is required"));
        }
        if key.len() > Self::MAX_LEN {
            return Err(EngineError::validation(
                "location",
                format!("Location key must be at most {} characters", Self::MAX_LEN),
            ));
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(EngineError::validation(
                "location",
                "Location key may only contain letters, digits, '-' and '_'",
            ));
        }
        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LocationKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocationKey> for String {
    fn from(key: LocationKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_half_up_ties_go_up() {
        assert_eq!(round_half_up(dec("20.75"), 1), dec("20.8"));
        assert_eq!(round_half_up(dec("4.645"), 2), dec("4.65"));
        assert_eq!(round_half_up(dec("20.74"), 1), dec("20.7"));
    }

    #[test]
    fn test_round_half_up_negative_ties_go_away_from_zero() {
        assert_eq!(round_half_up(dec("-2.25"), 1), dec("-2.3"));
    }

    #[test]
    fn test_location_key_accepts_simple_names() {
        assert_eq!(LocationKey::parse("bangkok").unwrap().as_str(), "bangkok");
        assert_eq!(LocationKey::parse(" store-042_a ").unwrap().as_str(), "store-042_a");
    }

    #[test]
    fn test_location_key_rejects_path_like_input() {
        assert!(LocationKey::parse("").is_err());
        assert!(LocationKey::parse("../etc/passwd").is_err());
        assert!(LocationKey::parse("a/b").is_err());
        assert!(LocationKey::parse(&"x".repeat(65)).is_err());
    }
}
