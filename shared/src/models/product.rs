//! Product catalog models

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::{Month, TemperatureCategory};

/// A perishable product as seen by the recommendation engine.
///
/// Read-only here; the catalog owns it. A month listed in both `peak_months`
/// and `low_months` is treated as a peak month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub ideal_category: TemperatureCategory,
    #[serde(default)]
    pub peak_months: BTreeSet<Month>,
    #[serde(default)]
    pub low_months: BTreeSet<Month>,
}

impl Product {
    pub fn new(name: impl Into<String>, ideal_category: TemperatureCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            ideal_category,
            peak_months: BTreeSet::new(),
            low_months: BTreeSet::new(),
        }
    }

    pub fn with_peak_months(mut self, months: impl IntoIterator<Item = Month>) -> Self {
        self.peak_months.extend(months);
        self
    }

    pub fn with_low_months(mut self, months: impl IntoIterator<Item = Month>) -> Self {
        self.low_months.extend(months);
        self
    }

    /// Months listed as both peak and low (catalog data-entry conflicts)
    pub fn conflicting_months(&self) -> Vec<Month> {
        self.peak_months.intersection(&self.low_months).copied().collect()
    }
}
