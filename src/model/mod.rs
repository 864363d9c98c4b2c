pub mod budget;
pub mod rules;
pub mod transaction;

pub use budget::{BudgetConfig, WhatIfConfig};
pub use rules::{CategoryRule, RuleTable, FALLBACK_CATEGORY};
pub use transaction::{sample_transactions, CategorizedTransaction, Transaction};
