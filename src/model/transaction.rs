use serde::{Deserialize, Serialize};

/// A single dated, described, signed monetary movement. Negative amounts are
/// spending; non-negative amounts are income or credits. Immutable once
/// ingested; the working set is replaced wholesale on import, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    pub fn new(date: impl Into<String>, description: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount,
            category: None,
        }
    }

    /// An explicit category from input overrides inference downstream.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_spend(&self) -> bool {
        self.amount < 0.0
    }
}

/// A transaction whose category has been resolved, explicit or inferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedTransaction {
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
}

/// Demo transaction set used when no stored working set exists.
pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new("2025-10-01", "Starbucks - Latte", -6.25),
        Transaction::new("2025-10-01", "Uber trip", -18.30),
        Transaction::new("2025-10-02", "Amazon marketplace", -42.10),
        Transaction::new("2025-10-02", "Spotify", -10.99),
        Transaction::new("2025-10-03", "Trader Joe's Groceries", -58.40),
        Transaction::new("2025-10-03", "ConEd Electric", -64.00),
        Transaction::new("2025-10-03", "Payroll", 850.00),
        Transaction::new("2025-10-03", "Starbucks - Cold Brew", -5.25),
        Transaction::new("2025-10-04", "Netflix", -15.49),
        Transaction::new("2025-10-04", "Lyft", -14.50),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_is_negative_amount_only() {
        assert!(Transaction::new("2025-10-01", "Coffee", -3.0).is_spend());
        assert!(!Transaction::new("2025-10-03", "Payroll", 850.0).is_spend());
        assert!(!Transaction::new("2025-10-03", "Refund", 0.0).is_spend());
    }

    #[test]
    fn category_absent_from_serialized_form_when_unset() {
        let json = serde_json::to_string(&Transaction::new("2025-10-01", "Coffee", -3.0)).unwrap();
        assert!(!json.contains("category"));
    }

    #[test]
    fn sample_set_mixes_spend_and_income() {
        let sample = sample_transactions();
        assert_eq!(sample.len(), 10);
        assert!(sample.iter().any(|txn| txn.is_spend()));
        assert!(sample.iter().any(|txn| !txn.is_spend()));
    }
}
