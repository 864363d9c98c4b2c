use serde::Serialize;

use crate::engine::compare::BudgetComparison;
use crate::utils::dollars;

/// A short advisory message derived from budget comparison flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub title: String,
    pub detail: String,
}

/// Renders the comparison flags as ordered guidance: per-category overages
/// first, then the global overage, then a single positive message when
/// nothing is over. Strictly downstream of the comparator; never re-derives
/// totals, so the displayed basis stays consistent across the dashboard.
pub fn suggestions(comparison: &BudgetComparison) -> Vec<Suggestion> {
    let mut items = Vec::new();
    for overage in &comparison.categories {
        items.push(Suggestion {
            title: format!(
                "Over budget in {} by {}",
                overage.category,
                dollars(overage.over_by)
            ),
            detail: format!(
                "Aim to cut about {}/week for the rest of the month.",
                dollars(overage.weekly_cut)
            ),
        });
    }
    if let Some(global) = &comparison.global {
        items.push(Suggestion {
            title: format!("Monthly target exceeded by {}", dollars(global.over_by)),
            detail: "Focus reductions on your top categories, or preview cuts with the what-if \
                     sliders."
                .into(),
        });
    }
    if items.is_empty() {
        items.push(Suggestion {
            title: "On track, looking good".into(),
            detail: "Consider sweeping the surplus into savings.".into(),
        });
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compare::{CategoryOverage, GlobalOverage};

    #[test]
    fn on_track_message_is_the_sole_entry_when_nothing_is_over() {
        let items = suggestions(&BudgetComparison::default());
        assert_eq!(items.len(), 1);
        assert!(items[0].title.contains("On track"));
    }

    #[test]
    fn category_flags_precede_the_global_flag() {
        let comparison = BudgetComparison {
            categories: vec![CategoryOverage {
                category: "Food".into(),
                spent: 250.0,
                cap: 220.0,
                over_by: 30.0,
                weekly_cut: 6.98,
            }],
            global: Some(GlobalOverage {
                spent: 850.0,
                budget: 800.0,
                over_by: 50.0,
            }),
        };
        let items = suggestions(&comparison);
        assert_eq!(items.len(), 2);
        assert!(items[0].title.contains("Food"));
        assert!(items[0].title.contains("$30.00"));
        assert!(items[0].detail.contains("$6.98/week"));
        assert!(items[1].title.contains("$50.00"));
    }
}
