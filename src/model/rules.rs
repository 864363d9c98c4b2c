use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Reserved category returned when no rule matches a description.
pub const FALLBACK_CATEGORY: &str = "Other";

/// One prioritized categorization rule: a category and its keyword set.
/// Keywords are stored lowercase; matching is substring containment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            category: category.into(),
            keywords: keywords.iter().map(|kw| kw.to_lowercase()).collect(),
        }
    }
}

/// Ordered category-to-keywords table. Order is significant: it defines match
/// priority, first match wins. The table doubles as the user-visible category
/// list; adding a category appends an entry with an empty keyword set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleTable {
    rules: Vec<CategoryRule>,
}

static DEFAULT_RULES: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::new(vec![
        CategoryRule::new(
            "Food",
            &[
                "ubereats",
                "doordash",
                "grubhub",
                "mcdonald",
                "starbucks",
                "chipotle",
                "papa john",
                "cafe",
                "restaurant",
                "trader joe",
                "whole foods",
            ],
        ),
        CategoryRule::new(
            "Transport",
            &["uber", "lyft", "mta", "metro", "transit", "shell", "exxon", "bp", "gas"],
        ),
        CategoryRule::new(
            "Shopping",
            &["amazon", "etsy", "target", "walmart", "nike", "best buy"],
        ),
        CategoryRule::new(
            "Entertainment",
            &["spotify", "netflix", "hulu", "disney", "amc", "theatre", "steam"],
        ),
        CategoryRule::new(
            "Bills",
            &["verizon", "t-mobile", "at&t", "coned", "electric", "utility", "rent"],
        ),
        CategoryRule::new(
            "Health",
            &["pharmacy", "walgreens", "cvs", "rite aid", "clinic", "dentist"],
        ),
        CategoryRule::new(FALLBACK_CATEGORY, &[]),
    ])
});

impl RuleTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// The built-in starter table; the fallback category is always present.
    pub fn default_table() -> Self {
        DEFAULT_RULES.clone()
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Categories in priority order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.category.as_str())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.rules.iter().any(|rule| rule.category == category)
    }

    /// Appends a new category with an empty keyword set. Returns `false`
    /// without modifying the table when the name is blank or already present.
    pub fn add_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.rules.push(CategoryRule {
            category: name.to_string(),
            keywords: Vec::new(),
        });
        true
    }

    /// Replaces the keyword set for a category, lowercasing and discarding
    /// blanks. Appends the category when it does not exist yet.
    pub fn set_keywords(&mut self, category: &str, keywords: &[String]) {
        let cleaned: Vec<String> = keywords
            .iter()
            .map(|kw| kw.trim().to_lowercase())
            .filter(|kw| !kw.is_empty())
            .collect();
        match self.rules.iter_mut().find(|rule| rule.category == category) {
            Some(rule) => rule.keywords = cleaned,
            None => self.rules.push(CategoryRule {
                category: category.to_string(),
                keywords: cleaned,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_keeps_declared_order() {
        let table = RuleTable::default_table();
        let categories: Vec<&str> = table.categories().collect();
        assert_eq!(
            categories,
            [
                "Food",
                "Transport",
                "Shopping",
                "Entertainment",
                "Bills",
                "Health",
                "Other"
            ]
        );
    }

    #[test]
    fn add_category_appends_empty_keyword_set() {
        let mut table = RuleTable::default_table();
        assert!(table.add_category("Travel"));
        assert!(table.contains("Travel"));
        assert!(table.rules().last().unwrap().keywords.is_empty());
        assert!(!table.add_category("Travel"), "duplicates are rejected");
        assert!(!table.add_category("  "), "blank names are rejected");
    }

    #[test]
    fn set_keywords_normalizes_and_upserts() {
        let mut table = RuleTable::default_table();
        table.set_keywords("Food", &[" Pizza ".into(), "".into(), "SUSHI".into()]);
        let food = &table.rules()[0];
        assert_eq!(food.keywords, ["pizza", "sushi"]);

        table.set_keywords("Travel", &["airline".into()]);
        assert!(table.contains("Travel"));
    }
}
