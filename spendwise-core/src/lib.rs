//! spendwise-core: categorization and aggregation for a personal-finance ledger

pub mod advice;
pub mod aggregate;
pub mod budget;
pub mod categorizer;
pub mod config;
pub mod finance;
pub mod goals;

pub use advice::{Advice, AdviceGenerator, AdviceTemplates};
pub use aggregate::{
    CategoryTotals, MonthKey, MonthlyEntry, MonthlySummary, TopExpense, category_percent,
    category_totals, expense_share, monthly_summary, monthly_trends, net_savings, top_expenses,
};
pub use budget::{BudgetEntry, BudgetEvaluator, BudgetLimit, BudgetStatus, BudgetTable};
pub use categorizer::{Categorizer, KeywordRule, Taxonomy};
pub use config::{AdvisorConfig, DEFAULT_TOP_EXPENSES};
pub use finance::{Category, Transaction, TxnType};
pub use goals::{GoalDescriptor, GoalPlan, GoalStatus};
