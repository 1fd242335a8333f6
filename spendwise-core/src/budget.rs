//! Budget-vs-actual evaluation against fixed per-category limits

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::aggregate::CategoryTotals;
use crate::finance::{Category, round_to};

/// Fixed monthly budget per category
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetTable {
    limits: BTreeMap<Category, f64>,
}

impl BudgetTable {
    pub fn new(limits: impl IntoIterator<Item = (Category, f64)>) -> Self {
        Self {
            limits: limits.into_iter().collect(),
        }
    }

    /// Limit for `category`; zero or negative limits count as unset
    pub fn limit(&self, category: &Category) -> Option<f64> {
        self.limits.get(category).copied().filter(|b| *b > 0.0)
    }
}

impl Default for BudgetTable {
    fn default() -> Self {
        Self::new(
            [
                ("Food", 5000.0),
                ("Rent", 10000.0),
                ("Entertainment", 3000.0),
                ("Transport", 2000.0),
                ("Shopping", 4000.0),
                ("Health", 2500.0),
                ("Bills", 3500.0),
                ("Savings", 5000.0),
            ]
            .into_iter()
            .map(|(label, limit)| (Category::from(label), limit)),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetStatus {
    #[serde(rename = "Over budget!")]
    OverBudget,
    #[serde(rename = "Near budget limit")]
    NearLimit,
    #[serde(rename = "Within budget")]
    WithinBudget,
    #[serde(rename = "No budget set")]
    NoBudgetSet,
}

impl BudgetStatus {
    /// Classify a spent-of-budget percentage. Both thresholds are strict.
    pub fn from_pct(pct: f64) -> Self {
        if pct > 100.0 {
            BudgetStatus::OverBudget
        } else if pct > 80.0 {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::WithinBudget
        }
    }
}

/// A budget amount, or "N/A" when the category has none
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetLimit {
    Amount(f64),
    NotSet,
}

impl Serialize for BudgetLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BudgetLimit::Amount(v) => serializer.serialize_f64(*v),
            BudgetLimit::NotSet => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetEntry {
    pub spent: f64,
    pub budget: BudgetLimit,
    pub pct: Option<f64>,
    pub status: BudgetStatus,
}

pub struct BudgetEvaluator {
    table: BudgetTable,
}

impl BudgetEvaluator {
    pub fn new(table: BudgetTable) -> Self {
        Self { table }
    }

    pub fn evaluate(&self, totals: &CategoryTotals) -> BTreeMap<Category, BudgetEntry> {
        totals
            .iter()
            .map(|(cat, spent)| (cat.clone(), self.entry(cat, *spent)))
            .collect()
    }

    fn entry(&self, category: &Category, spent: f64) -> BudgetEntry {
        match self.table.limit(category) {
            Some(budget) => {
                let pct = spent * 100.0 / budget;
                BudgetEntry {
                    spent: round_to(spent, 2),
                    budget: BudgetLimit::Amount(budget),
                    pct: Some(round_to(pct, 2)),
                    status: BudgetStatus::from_pct(pct),
                }
            }
            None => BudgetEntry {
                spent: round_to(spent, 2),
                budget: BudgetLimit::NotSet,
                pct: None,
                status: BudgetStatus::NoBudgetSet,
            },
        }
    }
}

impl Default for BudgetEvaluator {
    fn default() -> Self {
        Self::new(BudgetTable::default())
    }
}
