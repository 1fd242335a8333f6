//! Recommendation pipeline: load, categorize, aggregate, evaluate, advise.
//!
//! Every request recomputes the full report from the active dataset. Any
//! failure yields `Outcome::Error` with an empty report, never a partial one.

use anyhow::{Context, Result};
use serde::Serialize;
use spendwise_core::{
    AdviceGenerator, AdvisorConfig, BudgetEntry, BudgetEvaluator, Categorizer, Category,
    CategoryTotals, GoalPlan, GoalStatus, MonthKey, MonthlyEntry, MonthlySummary, TopExpense,
    Transaction, aggregate,
};
use spendwise_ingest::{DatasetSource, DatasetStore, parse_ledger_csv};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Every section of a recommendation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub advice: String,
    pub category_totals: CategoryTotals,
    pub budget_info: BTreeMap<Category, BudgetEntry>,
    pub monthly_summary: MonthlySummary,
    pub top_expenses: Vec<TopExpense>,
    pub category_pct: BTreeMap<Category, f64>,
    pub monthly_trends: BTreeMap<MonthKey, MonthlyEntry>,
    pub goals_status: BTreeMap<String, GoalStatus>,
}

/// Result of a recommendation request. Both variants carry the same fields,
/// so consumers can read any section without checking the status first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Success(Report),
    Error {
        message: String,
        #[serde(flatten)]
        report: Report,
    },
}

impl Outcome {
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Outcome::Error {
            report: Report {
                advice: format!("Error generating advice: {}", message),
                ..Report::default()
            },
            message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn report(&self) -> &Report {
        match self {
            Outcome::Success(report) | Outcome::Error { report, .. } => report,
        }
    }
}

/// Largest expenses plus each category's share of total expense
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// File the figures were computed from
    pub source: DatasetSource,
    pub top_expenses: Vec<TopExpense>,
    pub category_pct: BTreeMap<Category, f64>,
}

pub struct Advisor {
    categorizer: Categorizer,
    budgets: BudgetEvaluator,
    advice: AdviceGenerator,
    goals: GoalPlan,
    top_n: usize,
}

impl Advisor {
    pub fn new(config: AdvisorConfig) -> Self {
        Self {
            categorizer: Categorizer::new(config.taxonomy),
            budgets: BudgetEvaluator::new(config.budgets),
            advice: AdviceGenerator::new(config.templates),
            goals: config.goals,
            top_n: config.top_expenses,
        }
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Build a report from raw transactions; categories are (re)assigned here.
    pub fn recommend_transactions(&self, mut transactions: Vec<Transaction>) -> Report {
        self.categorizer.categorize_all(&mut transactions);

        let category_totals = aggregate::category_totals(&transactions);
        let advice = self.advice.generate(&category_totals);
        let budget_info = self.budgets.evaluate(&category_totals);
        let category_pct = aggregate::category_percent(&category_totals);
        let monthly_trends = aggregate::monthly_trends(&transactions);
        let goals_status = self.goals.progress(aggregate::net_savings(&transactions));

        debug!(
            "Report over {} transactions: {} categories, {} months",
            transactions.len(),
            category_totals.len(),
            monthly_trends.len()
        );

        Report {
            advice: advice.text(),
            budget_info,
            monthly_summary: aggregate::monthly_summary(&transactions),
            top_expenses: aggregate::top_expenses(&transactions, self.top_n),
            category_pct,
            monthly_trends,
            goals_status,
            category_totals,
        }
    }

    /// Full recommendation over the store's active dataset
    pub fn recommend(&self, store: &DatasetStore) -> Outcome {
        match self.try_recommend(store) {
            Ok(report) => Outcome::Success(report),
            Err(e) => {
                warn!("Recommendation failed: {:#}", e);
                Outcome::failure(format!("{:#}", e))
            }
        }
    }

    fn try_recommend(&self, store: &DatasetStore) -> Result<Report> {
        let (_, transactions) = store.load_active().context("loading dataset")?;
        Ok(self.recommend_transactions(transactions))
    }

    /// Top expenses and expense-only category shares of the active dataset
    pub fn insights(&self, store: &DatasetStore) -> Result<Insights> {
        let (source, mut transactions) = store.load_active().context("loading dataset")?;
        self.categorizer.categorize_all(&mut transactions);

        Ok(Insights {
            source,
            top_expenses: aggregate::top_expenses(&transactions, self.top_n),
            category_pct: aggregate::expense_share(&transactions),
        })
    }

    /// Parse, categorize and persist a ledger as the active dataset.
    /// Returns the categorized transactions.
    pub fn upload(&self, store: &DatasetStore, csv_path: &Path) -> Result<Vec<Transaction>> {
        let mut transactions = parse_ledger_csv(csv_path)
            .with_context(|| format!("parsing {}", csv_path.display()))?;
        self.categorizer.categorize_all(&mut transactions);

        let saved = store
            .save_upload(&transactions)
            .context("saving uploaded dataset")?;
        info!("Uploaded {} transactions to {}", transactions.len(), saved.display());

        Ok(transactions)
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(AdvisorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendwise_core::{KeywordRule, Taxonomy, TxnType};
    use spendwise_ingest::{parse_date, parse_ledger_reader};

    fn txn(date: &str, desc: &str, amount: f64, kind: TxnType) -> Transaction {
        Transaction::new(date, parse_date(date), desc, amount, kind)
    }

    fn scenario() -> Vec<Transaction> {
        vec![
            txn("2024-01-05", "Amazon purchase", 1200.0, TxnType::Expense),
            txn("2024-01-31", "Salary", 50000.0, TxnType::Income),
            txn("2024-02-02", "Netflix", 500.0, TxnType::Expense),
        ]
    }

    #[test]
    fn test_scenario_report() {
        let report = Advisor::default().recommend_transactions(scenario());

        assert_eq!(report.category_totals.len(), 3);
        assert_eq!(report.category_totals[&Category::from("Shopping")], 1200.0);
        assert_eq!(report.category_totals[&Category::income()], 50000.0);
        assert_eq!(report.category_totals[&Category::from("Entertainment")], 500.0);

        assert_eq!(report.category_pct[&Category::from("Shopping")], 70.6);
        assert_eq!(report.category_pct[&Category::from("Entertainment")], 29.4);

        let jan = &report.monthly_trends[&MonthKey { year: 2024, month: 1 }];
        assert_eq!((jan.income, jan.expenses, jan.savings), (50000.0, 1200.0, 48800.0));
        let feb = &report.monthly_trends[&MonthKey { year: 2024, month: 2 }];
        assert_eq!((feb.income, feb.expenses, feb.savings), (0.0, 500.0, -500.0));

        assert_eq!(report.top_expenses.len(), 2);
        assert_eq!(report.top_expenses[0].description, "Amazon purchase");
        assert_eq!(report.goals_status["Investment Goal"].current, 24150.0);
        assert_eq!(report.advice.lines().count(), 4);
    }

    #[test]
    fn test_day_first_dates_reach_monthly_trends() {
        let csv = "Date,Description,Amount,Type\n25/01/2024,Salary,50000,Income\n28/01/2024,Netflix,500,Expense\n";
        let txns = parse_ledger_reader(csv.as_bytes()).unwrap();
        let report = Advisor::default().recommend_transactions(txns);

        assert_eq!(report.monthly_trends.len(), 1);
        let jan = &report.monthly_trends[&MonthKey { year: 2024, month: 1 }];
        assert_eq!((jan.income, jan.expenses, jan.savings), (50000.0, 500.0, 49500.0));
    }

    #[test]
    fn test_budget_info_covers_every_category() {
        let report = Advisor::default().recommend_transactions(scenario());
        let keys: Vec<&Category> = report.budget_info.keys().collect();
        let totals: Vec<&Category> = report.category_totals.keys().collect();
        assert_eq!(keys, totals);
        assert_eq!(report.budget_info[&Category::from("Shopping")].pct, Some(30.0));
    }

    #[test]
    fn test_empty_dataset_report() {
        let report = Advisor::default().recommend_transactions(Vec::new());
        assert!(report.category_totals.is_empty());
        assert!(report.category_pct.is_empty());
        assert_eq!(report.advice, "No income data found. Track your salary for accurate advice.");
        assert_eq!(report.goals_status["Emergency Fund"].current, 0.0);
    }

    #[test]
    fn test_substitute_taxonomy() {
        let config = AdvisorConfig {
            taxonomy: Taxonomy::new(vec![KeywordRule::new("Streaming", &["netflix"])]),
            ..AdvisorConfig::default()
        };
        let report = Advisor::new(config).recommend_transactions(scenario());
        assert!(report.category_totals.contains_key(&Category::from("Streaming")));
        // Salary no longer matches anything, so there is no income category
        assert_eq!(report.category_totals[&Category::others()], 51200.0);
        assert!(report.advice.starts_with("No income data found"));
    }

    #[test]
    fn test_top_n_from_config() {
        let advisor = Advisor::new(AdvisorConfig::default().with_top_expenses(1));
        let report = advisor.recommend_transactions(scenario());
        assert_eq!(report.top_expenses.len(), 1);
    }

    #[test]
    fn test_failure_outcome_shape() {
        let outcome = Outcome::failure("boom");
        assert!(!outcome.is_success());
        assert_eq!(outcome.report().advice, "Error generating advice: boom");
        assert!(outcome.report().category_totals.is_empty());
        assert!(outcome.report().top_expenses.is_empty());
    }
}
