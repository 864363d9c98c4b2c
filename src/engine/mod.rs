//! The derivation pipeline: categorize, aggregate, then compare, simulate,
//! and suggest. Everything here is a pure function of the working transaction
//! set plus user configuration; the host re-derives in full on any change.

pub mod aggregate;
pub mod categorize;
pub mod compare;
pub mod simulate;
pub mod subscriptions;
pub mod suggest;

use serde::Serialize;

pub use aggregate::{
    aggregate, filter_transactions, merchant_key, top_merchants, Aggregates, MerchantBreakdown,
    Totals, MERCHANT_KEY_TOKENS,
};
pub use categorize::{categorize, infer_category};
pub use compare::{compare, BudgetComparison, CategoryOverage, GlobalOverage, WEEKS_PER_MONTH};
pub use simulate::simulate;
pub use subscriptions::{
    detect_subscriptions, SubscriptionCandidate, SUBSCRIPTION_KEY_TOKENS,
};
pub use suggest::{suggestions, Suggestion};

use crate::model::{BudgetConfig, RuleTable, Transaction, WhatIfConfig};
use crate::utils::round2;

/// Everything the dashboard derives from the working set and configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedState {
    pub aggregates: Aggregates,
    pub simulated_totals: Totals,
    pub using_simulation: bool,
    pub subscriptions: Vec<SubscriptionCandidate>,
    pub comparison: BudgetComparison,
    pub suggestions: Vec<Suggestion>,
}

impl DerivedState {
    /// The totals view the active basis selects.
    pub fn basis_totals(&self) -> &Totals {
        if self.using_simulation {
            &self.simulated_totals
        } else {
            &self.aggregates.totals
        }
    }

    /// Total spend on the active basis.
    pub fn basis_spend(&self) -> f64 {
        round2(self.basis_totals().values().sum())
    }
}

/// Recomputes all derived state from scratch over the current inputs. The
/// comparator and suggestion generator run against whichever basis the
/// what-if toggle selects.
pub fn derive_all(
    transactions: &[Transaction],
    rules: &RuleTable,
    budget: &BudgetConfig,
    what_if: &WhatIfConfig,
) -> DerivedState {
    let aggregates = aggregate(transactions, rules);
    let simulated_totals = simulate(&aggregates.totals, what_if);
    let basis = if what_if.use_simulation {
        &simulated_totals
    } else {
        &aggregates.totals
    };
    let comparison = compare(basis, budget);
    let suggestions = suggestions(&comparison);
    let subscriptions = detect_subscriptions(transactions);
    tracing::debug!(
        transactions = transactions.len(),
        categories = aggregates.totals.len(),
        using_simulation = what_if.use_simulation,
        "derived state recomputed"
    );
    DerivedState {
        aggregates,
        simulated_totals,
        using_simulation: what_if.use_simulation,
        subscriptions,
        comparison,
        suggestions,
    }
}

/// One row of the budget-vs-actual comparison view, in category priority
/// order: actual spend, simulated spend, and the configured target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    pub category: String,
    pub actual: f64,
    pub simulated: f64,
    pub target: f64,
}

/// Rows backing the budget-vs-actual chart, one per category in the table.
pub fn budget_vs_actual(rules: &RuleTable, state: &DerivedState, budget: &BudgetConfig) -> Vec<BudgetRow> {
    rules
        .categories()
        .map(|category| {
            let actual = state.aggregates.totals.get(category).copied().unwrap_or(0.0);
            let simulated = state
                .simulated_totals
                .get(category)
                .copied()
                .unwrap_or(actual);
            BudgetRow {
                category: category.to_string(),
                actual,
                simulated,
                target: budget.cap_for(category),
            }
        })
        .collect()
}

/// The burn-rate gauge pair: spend on the active basis versus the monthly cap.
pub fn burn_rate(state: &DerivedState, budget: &BudgetConfig) -> (f64, f64) {
    (state.basis_spend(), budget.monthly_total)
}
