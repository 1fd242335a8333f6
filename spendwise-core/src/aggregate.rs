//! Grouping and rollups over a categorized transaction set.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::finance::{Category, Transaction, round_to};

/// Sum of amounts per category, ordered by label
pub type CategoryTotals = BTreeMap<Category, f64>;

/// Sum every transaction's amount into its category, regardless of type.
pub fn category_totals(transactions: &[Transaction]) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for txn in transactions {
        *totals.entry(txn.category.clone()).or_insert(0.0) += txn.amount;
    }
    totals
}

/// Share of each non-income category in total non-income spend (1dp).
///
/// Returns an empty map when there is no non-income spend.
pub fn category_percent(totals: &CategoryTotals) -> BTreeMap<Category, f64> {
    let spend: f64 = totals
        .iter()
        .filter(|(cat, _)| !cat.is_income())
        .map(|(_, amt)| amt)
        .sum();

    if spend == 0.0 {
        return BTreeMap::new();
    }

    totals
        .iter()
        .filter(|(cat, _)| !cat.is_income())
        .map(|(cat, amt)| (cat.clone(), round_to(amt / spend * 100.0, 1)))
        .collect()
}

/// Share of each category within expense rows only (1dp).
pub fn expense_share(transactions: &[Transaction]) -> BTreeMap<Category, f64> {
    let expenses: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.is_expense())
        .cloned()
        .collect();
    let totals = category_totals(&expenses);
    let total: f64 = totals.values().sum();

    if total == 0.0 {
        return BTreeMap::new();
    }

    totals
        .into_iter()
        .map(|(cat, amt)| (cat, round_to(amt / total * 100.0, 1)))
        .collect()
}

/// Calendar month bucket; orders chronologically and renders as "January 2024"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => format!("{:04}-{:02}", self.year, self.month),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// Income, expenses and their difference for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthlyEntry {
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

/// Per-month income/expense rollup.
///
/// Rows without a parseable date are left out of this grouping only.
pub fn monthly_trends(transactions: &[Transaction]) -> BTreeMap<MonthKey, MonthlyEntry> {
    let mut raw: BTreeMap<MonthKey, (f64, f64)> = BTreeMap::new();

    for txn in transactions {
        let Some(date) = txn.parsed_date else {
            continue;
        };
        let bucket = raw.entry(MonthKey::from_date(date)).or_insert((0.0, 0.0));
        if txn.is_income() {
            bucket.0 += txn.amount;
        } else if txn.is_expense() {
            bucket.1 += txn.amount;
        }
    }

    raw.into_iter()
        .map(|(key, (income, expenses))| {
            (
                key,
                MonthlyEntry {
                    income: round_to(income, 2),
                    expenses: round_to(expenses, 2),
                    savings: round_to(income - expenses, 2),
                },
            )
        })
        .collect()
}

/// Whole-dataset income/expense position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub savings_pct: f64,
}

/// Income counts rows categorized as income; expenses count expense-typed rows.
pub fn monthly_summary(transactions: &[Transaction]) -> MonthlySummary {
    let income: f64 = transactions
        .iter()
        .filter(|t| t.category.is_income())
        .map(|t| t.amount)
        .sum();
    let expenses: f64 = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();
    let savings = income - expenses;
    let savings_pct = if income != 0.0 {
        savings / income * 100.0
    } else {
        0.0
    };

    MonthlySummary {
        income,
        expenses,
        savings,
        savings_pct,
    }
}

/// Net savings by transaction type: income rows minus expense rows
pub fn net_savings(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(|t| if t.is_income() { t.amount } else { -t.amount })
        .sum()
}

/// A single large expense, as reported to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopExpense {
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub category: Category,
}

/// The `n` largest expense rows, biggest first. Ties keep ledger order.
pub fn top_expenses(transactions: &[Transaction], n: usize) -> Vec<TopExpense> {
    let mut expenses: Vec<&Transaction> = transactions.iter().filter(|t| t.is_expense()).collect();
    expenses.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    expenses
        .into_iter()
        .take(n)
        .map(|t| TopExpense {
            date: t.date.clone(),
            description: t.description.clone(),
            amount: t.amount,
            category: t.category.clone(),
        })
        .collect()
}
