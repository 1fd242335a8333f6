//! Immutable tables that drive a report

use crate::advice::AdviceTemplates;
use crate::budget::BudgetTable;
use crate::categorizer::Taxonomy;
use crate::goals::GoalPlan;

/// How many expenses a report lists by default
pub const DEFAULT_TOP_EXPENSES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    pub taxonomy: Taxonomy,
    pub budgets: BudgetTable,
    pub templates: AdviceTemplates,
    pub goals: GoalPlan,
    pub top_expenses: usize,
}

impl AdvisorConfig {
    pub fn with_top_expenses(mut self, n: usize) -> Self {
        self.top_expenses = n;
        self
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            taxonomy: Taxonomy::default(),
            budgets: BudgetTable::default(),
            templates: AdviceTemplates::default(),
            goals: GoalPlan::default(),
            top_expenses: DEFAULT_TOP_EXPENSES,
        }
    }
}
