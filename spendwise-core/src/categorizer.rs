//! Keyword categorizer: maps free-text descriptions onto the category taxonomy.
//!
//! Rules are checked in declaration order and the first rule with a keyword
//! contained in the (lower-cased) description wins.

use tracing::debug;

use crate::finance::{Category, Transaction};

/// One ordered categorization rule
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordRule {
    pub category: Category,
    /// Lower-case substrings; any hit selects `category`
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(category: impl Into<Category>, keywords: &[&str]) -> Self {
        Self {
            category: category.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, desc_lower: &str) -> bool {
        self.keywords.iter().any(|k| desc_lower.contains(k.as_str()))
    }
}

/// Ordered keyword rules plus the fallback label
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    pub rules: Vec<KeywordRule>,
    pub fallback: Category,
}

impl Taxonomy {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self {
            rules,
            fallback: Category::others(),
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new(vec![
            KeywordRule::new(
                "Shopping",
                &["amazon", "flipkart", "myntra", "shopping", "grocery", "supermarket", "mall"],
            ),
            KeywordRule::new("Transport", &["uber", "ola", "metro", "bus", "train", "taxi"]),
            KeywordRule::new(
                "Entertainment",
                &["netflix", "prime", "spotify", "movie", "cinema", "tickets"],
            ),
            KeywordRule::new("Food", &["restaurant", "cafe", "dominos", "burger", "pizza"]),
            KeywordRule::new("Housing", &["rent", "flat", "apartment", "house"]),
            KeywordRule::new("Income", &["salary", "bonus", "deposit", "payroll"]),
        ])
    }
}

pub struct Categorizer {
    taxonomy: Taxonomy,
}

impl Categorizer {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Categorize a single description
    pub fn categorize(&self, description: &str) -> Category {
        let desc = description.to_lowercase();

        self.taxonomy
            .rules
            .iter()
            .find(|rule| rule.matches(&desc))
            .map(|rule| rule.category.clone())
            .unwrap_or_else(|| self.taxonomy.fallback.clone())
    }

    /// Assign a category to every transaction, overwriting whatever was there
    pub fn categorize_all(&self, transactions: &mut [Transaction]) {
        let mut unmatched = 0usize;
        for txn in transactions.iter_mut() {
            txn.category = self.categorize(&txn.description);
            if txn.category == self.taxonomy.fallback {
                unmatched += 1;
            }
        }
        debug!(
            "Categorized {} transactions ({} fell back to {})",
            transactions.len(),
            unmatched,
            self.taxonomy.fallback
        );
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(Taxonomy::default())
    }
}
