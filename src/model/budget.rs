use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Spending caps: one global monthly cap plus per-category caps. A zero or
/// absent cap means "unset", never a zero-tolerance budget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub monthly_total: f64,
    #[serde(default)]
    pub per_category: BTreeMap<String, f64>,
}

impl BudgetConfig {
    /// The configured cap for a category, `0.0` when unset.
    pub fn cap_for(&self, category: &str) -> f64 {
        self.per_category.get(category).copied().unwrap_or(0.0)
    }

    pub fn set_cap(&mut self, category: impl Into<String>, cap: f64) {
        self.per_category.insert(category.into(), cap.max(0.0));
    }

    pub fn set_monthly_total(&mut self, cap: f64) {
        self.monthly_total = cap.max(0.0);
    }
}

/// Hypothetical per-category spend reductions, in percent, plus the toggle
/// selecting whether downstream comparison uses actual or simulated totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WhatIfConfig {
    #[serde(default)]
    pub reductions: BTreeMap<String, f64>,
    #[serde(default)]
    pub use_simulation: bool,
}

impl WhatIfConfig {
    /// Reduction percentage for a category, clamped to `[0, 100]`. A category
    /// absent from the map reduces by nothing.
    pub fn reduction_for(&self, category: &str) -> f64 {
        self.reductions
            .get(category)
            .copied()
            .unwrap_or(0.0)
            .clamp(0.0, 100.0)
    }

    pub fn set_reduction(&mut self, category: impl Into<String>, percent: f64) {
        self.reductions
            .insert(category.into(), percent.clamp(0.0, 100.0));
    }
}
