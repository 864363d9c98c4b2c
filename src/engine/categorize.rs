use crate::model::{CategorizedTransaction, RuleTable, Transaction, FALLBACK_CATEGORY};

/// Infers a category for a description. Rules are scanned in table order and
/// the first category with a keyword contained in the lowercased description
/// wins; there is no scoring and no longest-match preference. Falls back to
/// the reserved category when nothing matches.
pub fn infer_category<'a>(description: &str, rules: &'a RuleTable) -> &'a str {
    let haystack = description.to_lowercase();
    for rule in rules.rules() {
        if rule
            .keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && haystack.contains(keyword.as_str()))
        {
            return &rule.category;
        }
    }
    FALLBACK_CATEGORY
}

/// Resolves a category for every transaction. An explicit category carried on
/// input bypasses inference entirely.
pub fn categorize(transactions: &[Transaction], rules: &RuleTable) -> Vec<CategorizedTransaction> {
    transactions
        .iter()
        .map(|txn| CategorizedTransaction {
            date: txn.date.clone(),
            description: txn.description.clone(),
            amount: txn.amount,
            category: txn
                .category
                .as_deref()
                .map(str::trim)
                .filter(|category| !category.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| infer_category(&txn.description, rules).to_string()),
        })
        .collect()
}
