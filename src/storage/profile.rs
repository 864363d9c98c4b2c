use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::engine::{derive_all, DerivedState};
use crate::model::{
    sample_transactions, BudgetConfig, RuleTable, Transaction, WhatIfConfig,
};

use super::{KvStore, Result};

/// Snapshot keys. Each is independent: a missing or unparseable entry falls
/// back to its documented default without blocking the others.
pub mod keys {
    pub const TRANSACTIONS: &str = "txns";
    pub const RULES: &str = "rules";
    pub const MONTHLY_BUDGET: &str = "monthly_budget";
    pub const CATEGORY_BUDGETS: &str = "category_budgets";
    pub const WHAT_IF: &str = "what_if";
    pub const USE_SIMULATION: &str = "use_simulation";
}

/// User-owned working state: the transaction set plus all configuration.
/// The transaction set is replaced wholesale on import; configuration
/// persists across imports and is edited independently.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileState {
    pub transactions: Vec<Transaction>,
    pub rules: RuleTable,
    pub budget: BudgetConfig,
    pub what_if: WhatIfConfig,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            transactions: sample_transactions(),
            rules: RuleTable::default_table(),
            budget: BudgetConfig::default(),
            what_if: WhatIfConfig::default(),
        }
    }
}

impl ProfileState {
    /// Loads every key from the store, key by key, substituting defaults for
    /// anything missing or unreadable.
    pub fn load(store: &dyn KvStore) -> Self {
        Self {
            transactions: load_key(store, keys::TRANSACTIONS, sample_transactions),
            rules: load_key(store, keys::RULES, RuleTable::default_table),
            budget: BudgetConfig {
                monthly_total: load_key(store, keys::MONTHLY_BUDGET, || 0.0),
                per_category: load_key(store, keys::CATEGORY_BUDGETS, BTreeMap::new),
            },
            what_if: WhatIfConfig {
                reductions: load_key(store, keys::WHAT_IF, BTreeMap::new),
                use_simulation: load_key(store, keys::USE_SIMULATION, || false),
            },
        }
    }

    pub fn save(&self, store: &dyn KvStore) -> Result<()> {
        save_key(store, keys::TRANSACTIONS, &self.transactions)?;
        save_key(store, keys::RULES, &self.rules)?;
        save_key(store, keys::MONTHLY_BUDGET, &self.budget.monthly_total)?;
        save_key(store, keys::CATEGORY_BUDGETS, &self.budget.per_category)?;
        save_key(store, keys::WHAT_IF, &self.what_if.reductions)?;
        save_key(store, keys::USE_SIMULATION, &self.what_if.use_simulation)?;
        Ok(())
    }

    /// Atomic full-set swap; configuration is untouched.
    pub fn replace_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    /// Adds a category across the rule table; budgets and what-if entries are
    /// left unset, which downstream treats as "no cap, no reduction".
    pub fn add_category(&mut self, name: &str) -> bool {
        self.rules.add_category(name)
    }

    /// Full recomputation of all derived state over the current inputs.
    pub fn derive(&self) -> DerivedState {
        derive_all(&self.transactions, &self.rules, &self.budget, &self.what_if)
    }
}

fn load_key<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
    fallback: impl FnOnce() -> T,
) -> T {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "stored value unreadable, using default");
                fallback()
            }
        },
        Ok(None) => fallback(),
        Err(err) => {
            tracing::warn!(key, %err, "store read failed, using default");
            fallback()
        }
    }
}

fn save_key<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> Result<()> {
    store.set(key, &serde_json::to_string(value)?)
}
