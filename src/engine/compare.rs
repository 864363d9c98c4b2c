use serde::Serialize;

use crate::engine::aggregate::Totals;
use crate::model::BudgetConfig;
use crate::utils::round2;

/// Approximate weeks per month, used to derive a corrective weekly pace.
pub const WEEKS_PER_MONTH: f64 = 4.3;

/// An over-cap category with its overage and suggested weekly correction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOverage {
    pub category: String,
    pub spent: f64,
    pub cap: f64,
    pub over_by: f64,
    pub weekly_cut: f64,
}

/// Overall spend exceeding the global monthly cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalOverage {
    pub spent: f64,
    pub budget: f64,
    pub over_by: f64,
}

/// Result of comparing one totals basis (actual or simulated) against the
/// configured caps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BudgetComparison {
    pub categories: Vec<CategoryOverage>,
    pub global: Option<GlobalOverage>,
}

impl BudgetComparison {
    pub fn is_on_track(&self) -> bool {
        self.categories.is_empty() && self.global.is_none()
    }
}

/// Flags every category whose spend exceeds a configured non-zero cap, and
/// the global overage when the basis total exceeds the monthly cap. A zero or
/// absent cap is "unset" and never flags; caps naming unknown categories are
/// inert until the category exists in the basis.
pub fn compare(totals: &Totals, budget: &BudgetConfig) -> BudgetComparison {
    let mut categories = Vec::new();
    for (category, &spent) in totals {
        let cap = budget.cap_for(category);
        if cap > 0.0 && spent > cap {
            let over_by = round2(spent - cap);
            categories.push(CategoryOverage {
                category: category.clone(),
                spent,
                cap,
                over_by,
                weekly_cut: round2(over_by / WEEKS_PER_MONTH),
            });
        }
    }

    let basis_spend = round2(totals.values().sum());
    let global = if budget.monthly_total > 0.0 && basis_spend > budget.monthly_total {
        Some(GlobalOverage {
            spent: basis_spend,
            budget: budget.monthly_total,
            over_by: round2(basis_spend - budget.monthly_total),
        })
    } else {
        None
    };

    BudgetComparison { categories, global }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals_of(entries: &[(&str, f64)]) -> Totals {
        entries
            .iter()
            .map(|(category, amount)| (category.to_string(), *amount))
            .collect()
    }

    #[test]
    fn category_overage_includes_weekly_pace() {
        let totals = totals_of(&[("Food", 250.0)]);
        let mut budget = BudgetConfig::default();
        budget.set_cap("Food", 220.0);
        let comparison = compare(&totals, &budget);
        assert_eq!(comparison.categories.len(), 1);
        let overage = &comparison.categories[0];
        assert_eq!(overage.over_by, 30.0);
        assert_eq!(overage.weekly_cut, 6.98);
        assert!(comparison.global.is_none());
    }

    #[test]
    fn zero_cap_is_unset_not_zero_tolerance() {
        let totals = totals_of(&[("Food", 250.0)]);
        let budget = BudgetConfig::default();
        assert!(compare(&totals, &budget).is_on_track());
    }

    #[test]
    fn global_overage_only_when_monthly_cap_configured() {
        let totals = totals_of(&[("Food", 500.0), ("Bills", 350.0)]);
        let mut budget = BudgetConfig::default();
        assert!(compare(&totals, &budget).global.is_none());

        budget.set_monthly_total(800.0);
        let comparison = compare(&totals, &budget);
        let global = comparison.global.expect("global overage");
        assert_eq!(global.over_by, 50.0);
        assert_eq!(global.spent, 850.0);
    }

    #[test]
    fn caps_for_unknown_categories_are_inert() {
        let totals = totals_of(&[("Food", 10.0)]);
        let mut budget = BudgetConfig::default();
        budget.set_cap("Spaceships", 1.0);
        assert!(compare(&totals, &budget).is_on_track());
    }
}
