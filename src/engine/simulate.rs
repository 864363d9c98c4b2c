use crate::engine::aggregate::Totals;
use crate::model::WhatIfConfig;
use crate::utils::round2;

/// Derives the simulated totals view by applying each category's percentage
/// reduction to its actual total. Read-only and idempotent; a category absent
/// from the what-if map keeps its actual total, and reductions targeting
/// categories with no spend are no-ops.
pub fn simulate(totals: &Totals, what_if: &WhatIfConfig) -> Totals {
    totals
        .iter()
        .map(|(category, &actual)| {
            let cut = what_if.reduction_for(category) / 100.0;
            (category.clone(), round2(actual * (1.0 - cut)))
        })
        .collect()
}
