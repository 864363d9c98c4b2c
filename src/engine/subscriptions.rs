use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::aggregate::merchant_key;
use crate::model::Transaction;
use crate::utils::round2;

/// Token count for subscription matching; looser than category-merchant
/// grouping so variants of the same recurring charge coincide.
pub const SUBSCRIPTION_KEY_TOKENS: usize = 2;

const MIN_OCCURRENCES: usize = 2;
const MAX_CANDIDATES: usize = 5;

/// A merchant that recurs within the working set, with its estimated monthly
/// charge (mean absolute amount across occurrences).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionCandidate {
    pub merchant: String,
    #[serde(rename = "estMonthly")]
    pub est_monthly: f64,
}

/// Flags likely subscriptions: spend transactions grouped by a two-token
/// merchant key, kept only when the key recurs, sorted by estimated monthly
/// charge and truncated to the top five. A heuristic, not a guarantee; no
/// weekly/monthly cadence inference is attempted.
pub fn detect_subscriptions(transactions: &[Transaction]) -> Vec<SubscriptionCandidate> {
    let mut by_merchant: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    for txn in transactions.iter().filter(|txn| txn.is_spend()) {
        let key = merchant_key(&txn.description, SUBSCRIPTION_KEY_TOKENS);
        let entry = by_merchant.entry(key).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += txn.amount.abs();
    }
    let mut candidates: Vec<SubscriptionCandidate> = by_merchant
        .into_iter()
        .filter(|(_, (count, _))| *count >= MIN_OCCURRENCES)
        .map(|(merchant, (count, total))| SubscriptionCandidate {
            merchant,
            est_monthly: round2(total / count as f64),
        })
        .collect();
    candidates.sort_by(|a, b| {
        b.est_monthly
            .partial_cmp(&a.est_monthly)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(MAX_CANDIDATES);
    candidates
}
