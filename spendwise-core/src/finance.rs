//! Transaction record types shared by every stage of the pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the category that collects income rows
pub const INCOME: &str = "Income";
/// Catch-all label for descriptions no keyword rule matches
pub const OTHERS: &str = "Others";

/// A category label assigned by the categorizer.
///
/// Labels are plain strings so alternate taxonomies can be swapped in
/// without touching the aggregation code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn income() -> Self {
        Self::new(INCOME)
    }

    pub fn others() -> Self {
        Self::new(OTHERS)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_income(&self) -> bool {
        self.0 == INCOME
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Whether a ledger row brings money in or sends it out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    /// Parse the ledger's `Type` column (case-insensitive)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TxnType::Income),
            "expense" => Some(TxnType::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Income => "Income",
            TxnType::Expense => "Expense",
        }
    }
}

/// One categorized ledger row
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Transaction {
    /// Date text exactly as it appeared in the ledger
    pub date: String,
    /// Parsed date; `None` when missing or unparseable
    #[serde(skip)]
    pub parsed_date: Option<NaiveDate>,
    pub description: String,
    /// Always positive; `kind` says which way the money went
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TxnType,
    pub category: Category,
}

impl Transaction {
    /// Create an uncategorized transaction (category starts as `Others`)
    pub fn new(
        date: impl Into<String>,
        parsed_date: Option<NaiveDate>,
        description: impl Into<String>,
        amount: f64,
        kind: TxnType,
    ) -> Self {
        Self {
            date: date.into(),
            parsed_date,
            description: description.into(),
            amount,
            kind,
            category: Category::others(),
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxnType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxnType::Income
    }
}

/// Round to `places` decimal digits
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Render an amount the way a ledger shows it: whole numbers without a
/// fractional part, everything else with two decimals.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_creation() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5);
        let txn = Transaction::new("2024-01-05", date, "Amazon purchase", 1200.0, TxnType::Expense);
        assert!(txn.is_expense());
        assert!(!txn.is_income());
        assert_eq!(txn.category, Category::others());
    }

    #[test]
    fn test_txn_type_parse() {
        assert_eq!(TxnType::parse("Income"), Some(TxnType::Income));
        assert_eq!(TxnType::parse(" expense "), Some(TxnType::Expense));
        assert_eq!(TxnType::parse("Transfer"), None);
    }

    #[test]
    fn test_category_serializes_as_plain_string() {
        let json = serde_json::to_string(&Category::income()).unwrap();
        assert_eq!(json, "\"Income\"");
        assert!(Category::from("Income").is_income());
        assert!(!Category::others().is_income());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(70.588, 1), 70.6);
        assert_eq!(round_to(29.4117, 1), 29.4);
        assert_eq!(round_to(33.333333, 2), 33.33);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(50000.0), "50000");
        assert_eq!(format_amount(1234.5), "1234.50");
    }
}
