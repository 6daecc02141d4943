//! Recommendation scoring
//!
//! A product's score for a (temperature category, month) pair is a weighted
//! sum of a climate score (how close the target category is to the product's
//! ideal one) and a seasonality score (peak / neutral / low month).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Month, Product, RecommendationResult, RecommendationTag, SeasonalityTier, TemperatureCategory,
};
use crate::types::round_half_up;

/// Scoring constants, constructed once and handed to the engine.
///
/// With the defaults the highest reachable final score is 13.5, below the
/// 18 point "Good" threshold, so no product is ever tagged Good. The
/// thresholds are kept as observed; callers can inspect [`ScoringConfig::max_score`]
/// or override the thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Climate score when the target category equals the ideal one
    pub perfect_climate_score: Decimal,
    /// Fraction of the perfect score by ordinal distance; entry `d - 1` is
    /// used for distance `d`, distances past the end score zero
    pub climate_decay: Vec<Decimal>,
    pub climate_weight: Decimal,
    pub seasonality_weight: Decimal,
    pub peak_score: Decimal,
    pub neutral_score: Decimal,
    pub low_score: Decimal,
    /// Scores at or above this are tagged Good
    pub good_threshold: Decimal,
    /// Scores at or above this (and below `good_threshold`) are tagged Medium
    pub medium_threshold: Decimal,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            perfect_climate_score: Decimal::from(15),
            climate_decay: vec![Decimal::new(6, 1), Decimal::new(3, 1), Decimal::new(1, 1)],
            climate_weight: Decimal::new(7, 1),
            seasonality_weight: Decimal::new(3, 1),
            peak_score: Decimal::from(10),
            neutral_score: Decimal::from(5),
            low_score: Decimal::ZERO,
            good_threshold: Decimal::from(18),
            medium_threshold: Decimal::from(8),
        }
    }
}

impl ScoringConfig {
    /// Reject configurations that would break score monotonicity or bounds
    pub fn validate(&self) -> EngineResult<()> {
        let non_negative = [
            ("perfect_climate_score", self.perfect_climate_score),
            ("climate_weight", self.climate_weight),
            ("seasonality_weight", self.seasonality_weight),
            ("low_score", self.low_score),
            ("medium_threshold", self.medium_threshold),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(EngineError::validation(field, "Must not be negative"));
            }
        }

        if !(self.peak_score >= self.neutral_score && self.neutral_score >= self.low_score) {
            return Err(EngineError::validation(
                "peak_score",
                "Seasonality scores must satisfy peak >= neutral >= low",
            ));
        }

        let mut previous = Decimal::ONE;
        for factor in &self.climate_decay {
            if *factor < Decimal::ZERO || *factor > previous {
                return Err(EngineError::validation(
                    "climate_decay",
                    "Decay factors must lie in [0, 1] and must not increase with distance",
                ));
            }
            previous = *factor;
        }

        if self.medium_threshold > self.good_threshold {
            return Err(EngineError::validation(
                "medium_threshold",
                "Medium threshold must not exceed the good threshold",
            ));
        }

        Ok(())
    }

    /// Climate score from the ordinal distance between two categories
    pub fn climate_score(
        &self,
        product_category: TemperatureCategory,
        target_category: TemperatureCategory,
    ) -> Decimal {
        if product_category == target_category {
            return self.perfect_climate_score;
        }

        let distance = product_category.distance(target_category);
        self.climate_decay
            .get(distance - 1)
            .map(|factor| self.perfect_climate_score * factor)
            .unwrap_or(Decimal::ZERO)
    }

    /// Points for a seasonality tier
    pub fn tier_score(&self, tier: SeasonalityTier) -> Decimal {
        match tier {
            SeasonalityTier::Peak => self.peak_score,
            SeasonalityTier::Neutral => self.neutral_score,
            SeasonalityTier::Low => self.low_score,
        }
    }

    pub fn seasonality_score(&self, product: &Product, month: Month) -> Decimal {
        self.tier_score(seasonality_tier(product, month))
    }

    /// Weighted sum, rounded half-up to 2 decimals
    pub fn final_score(&self, climate_score: Decimal, seasonality_score: Decimal) -> Decimal {
        round_half_up(
            climate_score * self.climate_weight + seasonality_score * self.seasonality_weight,
            2,
        )
    }

    pub fn tag(&self, score: Decimal) -> RecommendationTag {
        if score >= self.good_threshold {
            RecommendationTag::Good
        } else if score >= self.medium_threshold {
            RecommendationTag::Medium
        } else {
            RecommendationTag::Poor
        }
    }

    /// Highest final score reachable with these constants
    pub fn max_score(&self) -> Decimal {
        let best_season = self.peak_score.max(self.neutral_score).max(self.low_score);
        self.final_score(self.perfect_climate_score, best_season)
    }

    /// Score a single product against a target category and month
    pub fn score_product(
        &self,
        product: &Product,
        target_category: TemperatureCategory,
        month: Month,
    ) -> RecommendationResult {
        let climate = self.climate_score(product.ideal_category, target_category);
        let seasonality = self.seasonality_score(product, month);
        let score = self.final_score(climate, seasonality);

        RecommendationResult {
            product_id: product.id,
            name: product.name.clone(),
            category: product.ideal_category,
            score,
            tag: self.tag(score),
        }
    }
}

/// Seasonal tier of a product in a month. Peak is checked first, so a month
/// listed as both peak and low counts as peak.
pub fn seasonality_tier(product: &Product, month: Month) -> SeasonalityTier {
    if product.peak_months.contains(&month) {
        SeasonalityTier::Peak
    } else if product.low_months.contains(&month) {
        SeasonalityTier::Low
    } else {
        SeasonalityTier::Neutral
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
    fn test_default_config_is_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_climate_score_decay_table() {
        let config = ScoringConfig::default();
        use TemperatureCategory::*;
        assert_eq!(config.climate_score(Hot, Hot), dec("15"));
        assert_eq!(config.climate_score(Mild, Hot), dec("9.0"));
        assert_eq!(config.climate_score(Cold, Hot), dec("4.5"));
        assert_eq!(config.climate_score(Freezing, Hot), dec("1.5"));
        assert_eq!(config.climate_score(Hot, Freezing), dec("1.5"));
    }

    #[test]
    fn test_distance_past_table_scores_zero() {
        let config = ScoringConfig {
            climate_decay: vec![dec("0.5")],
            ..ScoringConfig::default()
        };
        assert_eq!(
            config.climate_score(TemperatureCategory::Cold, TemperatureCategory::Hot),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_overlapping_peak_and_low_resolves_to_peak() {
        let product = Product::new("Watermelon", TemperatureCategory::Hot)
            .with_peak_months([Month::July])
            .with_low_months([Month::July, Month::January]);
        assert_eq!(seasonality_tier(&product, Month::July), SeasonalityTier::Peak);
        assert_eq!(seasonality_tier(&product, Month::January), SeasonalityTier::Low);
        assert_eq!(seasonality_tier(&product, Month::March), SeasonalityTier::Neutral);
        assert_eq!(product.conflicting_months(), vec![Month::July]);
    }

    #[test]
    fn test_tag_thresholds() {
        let config = ScoringConfig::default();
        assert_eq!(config.tag(dec("18")), RecommendationTag::Good);
        assert_eq!(config.tag(dec("17.99")), RecommendationTag::Medium);
        assert_eq!(config.tag(dec("8")), RecommendationTag::Medium);
        assert_eq!(config.tag(dec("7.99")), RecommendationTag::Poor);
    }

    #[test]
    fn test_good_unreachable_with_default_weights() {
        let config = ScoringConfig::default();
        assert_eq!(config.max_score(), dec("13.5"));
        assert!(config.max_score() < config.good_threshold);
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let increasing_decay = ScoringConfig {
            climate_decay: vec![dec("0.3"), dec("0.6")],
            ..ScoringConfig::default()
        };
        assert!(increasing_decay.validate().is_err());

        let negative_weight = ScoringConfig {
            climate_weight: dec("-0.1"),
            ..ScoringConfig::default()
        };
        assert!(negative_weight.validate().is_err());

        let inverted_thresholds = ScoringConfig {
            medium_threshold: dec("20"),
            ..ScoringConfig::default()
        };
        assert!(inverted_thresholds.validate().is_err());

        let inverted_seasons = ScoringConfig {
            low_score: dec("7"),
            ..ScoringConfig::default()
        };
        assert!(inverted_seasons.validate().is_err());
    }

    #[test]
    fn test_config_deserializes_with_partial_overrides() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{"good_threshold": 12, "medium_threshold": "6.5"}"#).unwrap();
        assert_eq!(config.good_threshold, dec("12"));
        assert_eq!(config.medium_threshold, dec("6.5"));
        assert_eq!(config.climate_weight, dec("0.7"));
        assert_eq!(config.tag(dec("13.5")), RecommendationTag::Good);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn category() -> impl Strategy<Value = TemperatureCategory> {
            prop::sample::select(TemperatureCategory::ALL.to_vec())
        }

        fn month() -> impl Strategy<Value = Month> {
            prop::sample::select(Month::ALL.to_vec())
        }

        proptest! {
            #[test]
            fn prop_score_never_exceeds_max(
                ideal in category(),
                target in category(),
                at in month(),
                peak in prop::collection::btree_set(month(), 0..4),
                low in prop::collection::btree_set(month(), 0..4),
            ) {
                let config = ScoringConfig::default();
                let product = Product::new("Any", ideal)
                    .with_peak_months(peak)
                    .with_low_months(low);

                let result = config.score_product(&product, target, at);
                prop_assert!(result.score >= Decimal::ZERO);
                prop_assert!(result.score <= config.max_score());
            }

            #[test]
            fn prop_climate_score_is_symmetric(a in category(), b in category()) {
                let config = ScoringConfig::default();
                prop_assert_eq!(config.climate_score(a, b), config.climate_score(b, a));
            }
        }
    }
}
