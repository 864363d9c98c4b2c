use std::collections::BTreeMap;

use crate::engine::categorize::categorize;
use crate::model::{CategorizedTransaction, RuleTable, Transaction};
use crate::utils::round2;

/// Per-category spend totals, stored as positive magnitudes in cents-rounded
/// dollars.
pub type Totals = BTreeMap<String, f64>;

/// Per-category map from normalized merchant key to accumulated spend.
pub type MerchantBreakdown = BTreeMap<String, BTreeMap<String, f64>>;

/// Token count for category-merchant grouping. Wants more specificity than
/// subscription matching, which uses two tokens.
pub const MERCHANT_KEY_TOKENS: usize = 3;

/// Output of the aggregation hub: the categorized working set plus all spend
/// rollups derived from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    pub categorized: Vec<CategorizedTransaction>,
    pub totals: Totals,
    pub merchant_breakdown: MerchantBreakdown,
    pub total_spend: f64,
}

/// Categorizes every transaction and accumulates spend-only aggregates.
/// Income transactions are retained in `categorized` but excluded from all
/// monetary rollups. Never fails: empty input yields zero totals.
pub fn aggregate(transactions: &[Transaction], rules: &RuleTable) -> Aggregates {
    let categorized = categorize(transactions, rules);
    let mut raw_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut raw_breakdown: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for txn in categorized.iter().filter(|txn| txn.amount < 0.0) {
        let magnitude = txn.amount.abs();
        *raw_totals.entry(txn.category.clone()).or_default() += magnitude;
        *raw_breakdown
            .entry(txn.category.clone())
            .or_default()
            .entry(merchant_key(&txn.description, MERCHANT_KEY_TOKENS))
            .or_default() += magnitude;
    }

    // Rounding happens once, after accumulation.
    let totals: Totals = raw_totals
        .into_iter()
        .map(|(category, sum)| (category, round2(sum)))
        .collect();
    let total_spend = round2(totals.values().sum());
    let merchant_breakdown: MerchantBreakdown = raw_breakdown
        .into_iter()
        .map(|(category, merchants)| {
            (
                category,
                merchants
                    .into_iter()
                    .map(|(merchant, sum)| (merchant, round2(sum)))
                    .collect(),
            )
        })
        .collect();

    Aggregates {
        categorized,
        totals,
        merchant_breakdown,
        total_spend,
    }
}

/// Normalized merchant key: lowercase the description, strip everything but
/// alphanumerics and spaces, keep the first `tokens` whitespace-delimited
/// tokens.
pub fn merchant_key(description: &str, tokens: usize) -> String {
    let cleaned: String = description
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    cleaned
        .split_whitespace()
        .take(tokens)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Top merchants by accumulated spend within one category, largest first.
pub fn top_merchants(
    breakdown: &MerchantBreakdown,
    category: &str,
    limit: usize,
) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = breakdown
        .get(category)
        .map(|merchants| {
            merchants
                .iter()
                .map(|(merchant, amount)| (merchant.clone(), *amount))
                .collect()
        })
        .unwrap_or_default();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries.truncate(limit);
    entries
}

/// Case-insensitive description search over the categorized set, optionally
/// restricted to one category. Backs the dashboard transaction table.
pub fn filter_transactions<'a>(
    categorized: &'a [CategorizedTransaction],
    category: Option<&str>,
    query: &str,
) -> Vec<&'a CategorizedTransaction> {
    let needle = query.trim().to_lowercase();
    categorized
        .iter()
        .filter(|txn| category.map_or(true, |wanted| txn.category == wanted))
        .filter(|txn| needle.is_empty() || txn.description.to_lowercase().contains(&needle))
        .collect()
}
