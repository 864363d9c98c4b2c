use budget_coach::engine::{aggregate, derive_all, simulate};
use budget_coach::import::parse_structured;
use budget_coach::model::{
    sample_transactions, BudgetConfig, RuleTable, Transaction, WhatIfConfig,
};
use budget_coach::utils::round2;

fn default_state(
    transactions: &[Transaction],
    budget: &BudgetConfig,
    what_if: &WhatIfConfig,
) -> budget_coach::engine::DerivedState {
    derive_all(transactions, &RuleTable::default_table(), budget, what_if)
}

#[test]
fn totals_always_sum_to_total_spend() {
    let sets: Vec<Vec<Transaction>> = vec![
        Vec::new(),
        sample_transactions(),
        vec![Transaction::new("2025-10-03", "Payroll", 850.0)],
        vec![
            Transaction::new("2025-10-01", "Mystery merchant", -12.34),
            Transaction::new("2025-10-02", "Tagged row", -7.66).with_category("Custom"),
            Transaction::new("2025-10-02", "Refund", 3.00),
        ],
    ];
    for transactions in sets {
        let aggregates = aggregate(&transactions, &RuleTable::default_table());
        let sum: f64 = aggregates.totals.values().sum();
        let spend_magnitude: f64 = transactions
            .iter()
            .filter(|txn| txn.amount < 0.0)
            .map(|txn| txn.amount.abs())
            .sum();
        assert!((round2(sum) - aggregates.total_spend).abs() < 1e-9);
        assert!((aggregates.total_spend - round2(spend_magnitude)).abs() < 1e-9);
    }
}

#[test]
fn starbucks_boundary_case_categorizes_but_does_not_flag_a_subscription() {
    let transactions = vec![
        Transaction::new("2025-10-01", "Starbucks - Latte", -6.25),
        Transaction::new("2025-10-03", "Starbucks - Cold Brew", -5.25),
    ];
    let state = default_state(
        &transactions,
        &BudgetConfig::default(),
        &WhatIfConfig::default(),
    );
    assert!(state
        .aggregates
        .categorized
        .iter()
        .all(|txn| txn.category == "Food"));
    assert_eq!(state.aggregates.totals["Food"], 11.50);
    // Two-token merchant keys differ ("starbucks latte" vs "starbucks cold"),
    // so nothing recurs.
    assert!(state.subscriptions.is_empty());
}

#[test]
fn monthly_overage_suggestion_cites_the_gap() {
    let transactions = vec![
        Transaction::new("2025-10-01", "Rent payment", -500.0),
        Transaction::new("2025-10-02", "Amazon marketplace", -350.0),
    ];
    let mut budget = BudgetConfig::default();
    budget.set_monthly_total(800.0);
    let state = default_state(&transactions, &budget, &WhatIfConfig::default());
    assert_eq!(state.aggregates.total_spend, 850.0);
    assert_eq!(state.suggestions.len(), 1);
    assert!(state.suggestions[0].title.contains("$50.00"));
}

#[test]
fn category_overage_suggestion_cites_amount_and_weekly_pace() {
    let transactions = vec![Transaction::new("2025-10-01", "Starbucks - Latte", -250.0)];
    let mut budget = BudgetConfig::default();
    budget.set_cap("Food", 220.0);
    let state = default_state(&transactions, &budget, &WhatIfConfig::default());
    assert_eq!(state.suggestions.len(), 1);
    assert!(state.suggestions[0].title.contains("Food"));
    assert!(state.suggestions[0].title.contains("$30.00"));
    assert!(state.suggestions[0].detail.contains("$6.98"));
}

#[test]
fn simulated_totals_stay_between_zero_and_actual() {
    let aggregates = aggregate(&sample_transactions(), &RuleTable::default_table());
    for percent in (0..=100).step_by(5) {
        let mut what_if = WhatIfConfig::default();
        for category in aggregates.totals.keys() {
            what_if.set_reduction(category.clone(), percent as f64);
        }
        let simulated = simulate(&aggregates.totals, &what_if);
        for (category, &actual) in &aggregates.totals {
            let value = simulated[category];
            assert!(
                (0.0..=actual).contains(&value),
                "{category} at {percent}%: {value} not in [0, {actual}]"
            );
        }
    }
}

#[test]
fn categorized_set_reimports_with_identical_totals() {
    let rules = RuleTable::default_table();
    let original = aggregate(&sample_transactions(), &rules);
    let values = serde_json::to_value(&original.categorized)
        .unwrap()
        .as_array()
        .cloned()
        .unwrap();
    let reimported = parse_structured(&values);
    let recomputed = aggregate(&reimported, &rules);
    assert_eq!(recomputed.totals, original.totals);
    assert_eq!(recomputed.total_spend, original.total_spend);
}

#[test]
fn recomputation_from_scratch_is_deterministic() {
    let mut budget = BudgetConfig::default();
    budget.set_monthly_total(800.0);
    budget.set_cap("Food", 50.0);
    let mut what_if = WhatIfConfig::default();
    what_if.set_reduction("Food", 40.0);
    what_if.use_simulation = true;

    let first = default_state(&sample_transactions(), &budget, &what_if);
    let second = default_state(&sample_transactions(), &budget, &what_if);
    assert_eq!(first, second);
}
