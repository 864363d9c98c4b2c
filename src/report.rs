use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::engine::{DerivedState, SubscriptionCandidate, Totals};
use crate::errors::CoachError;
use crate::model::BudgetConfig;

/// A category flagged over budget in the export, with its overage amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overspend {
    pub category: String,
    pub over_by: f64,
}

/// The sole durable export artifact: a snapshot of all derived state plus the
/// configuration it was computed against. A pure function of its inputs; the
/// month label is the only clock-dependent field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub month: String,
    pub monthly_budget: f64,
    pub category_budgets: BTreeMap<String, f64>,
    pub totals: Totals,
    pub simulated_totals: Totals,
    pub using_simulation: bool,
    pub total_spend: f64,
    pub subscriptions: Vec<SubscriptionCandidate>,
    pub overspent: Vec<Overspend>,
}

impl Report {
    /// Snapshots the current derived state, labelled with the current month.
    pub fn build(state: &DerivedState, budget: &BudgetConfig) -> Self {
        Self::build_for_month(state, budget, &Utc::now().format("%Y-%m").to_string())
    }

    /// Snapshots the current derived state under an explicit `YYYY-MM` label.
    /// `overspent` is computed against whichever basis is active; `totalSpend`
    /// always reports actual spend.
    pub fn build_for_month(state: &DerivedState, budget: &BudgetConfig, month: &str) -> Self {
        Self {
            month: month.to_string(),
            monthly_budget: budget.monthly_total,
            category_budgets: budget.per_category.clone(),
            totals: state.aggregates.totals.clone(),
            simulated_totals: state.simulated_totals.clone(),
            using_simulation: state.using_simulation,
            total_spend: state.aggregates.total_spend,
            subscriptions: state.subscriptions.clone(),
            overspent: state
                .comparison
                .categories
                .iter()
                .map(|overage| Overspend {
                    category: overage.category.clone(),
                    over_by: overage.over_by,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, CoachError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
