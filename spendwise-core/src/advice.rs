//! Templated spending advice derived from category totals.
//!
//! Templates use `{pct}` (percent of income, one decimal) and `{tip}`
//! placeholders. Categories without their own template use the fallback.

use std::collections::BTreeMap;

use crate::aggregate::CategoryTotals;
use crate::finance::{Category, format_amount};

const NO_INCOME: &str = "No income data found. Track your salary for accurate advice.";

const TIP_REDUCE: &str = "Consider reducing spending in this category.";
const TIP_WATCH: &str = "Good control, but watch for overspending.";
const TIP_EXCELLENT: &str = "Excellent management in this area.";

const SAVINGS_LOW: &str = "Your savings are low. Try to reduce discretionary spending.";
const SAVINGS_MODERATE: &str = "Savings are moderate. Good job, but you can save more!";
const SAVINGS_HEALTHY: &str = "Excellent! You are saving a healthy portion of your income.";

/// Per-category advice templates
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceTemplates {
    pub by_category: BTreeMap<Category, String>,
    pub fallback: String,
    /// Line for the income category; `{amount}` is the income total
    pub income: String,
}

impl AdviceTemplates {
    fn template_for(&self, category: &Category) -> &str {
        self.by_category
            .get(category)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl Default for AdviceTemplates {
    fn default() -> Self {
        let by_category = [
            ("Shopping", "You spent {pct}% of your income on shopping. {tip}"),
            ("Food", "Food costs are {pct}% of your income. {tip}"),
            ("Housing", "Housing/rent takes {pct}% of income. {tip}"),
            ("Transport", "Transport spending is {pct}% of income. {tip}"),
            ("Entertainment", "Entertainment is {pct}% of income. {tip}"),
        ]
        .into_iter()
        .map(|(cat, tpl)| (Category::from(cat), tpl.to_string()))
        .collect();

        Self {
            by_category,
            fallback: "Other expenses total {pct}% of income. {tip}".to_string(),
            income: "Your total income is {amount}. Keep a portion for savings!".to_string(),
        }
    }
}

/// Rendered advice, one line per remark
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Advice {
    pub lines: Vec<String>,
}

impl Advice {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Tip for a category that takes `pct` percent of income
pub fn spending_tip(pct: f64) -> &'static str {
    if pct > 20.0 {
        TIP_REDUCE
    } else if pct > 10.0 {
        TIP_WATCH
    } else {
        TIP_EXCELLENT
    }
}

/// Closing remark for a savings rate given in percent
pub fn savings_remark(savings_pct: f64) -> &'static str {
    if savings_pct < 10.0 {
        SAVINGS_LOW
    } else if savings_pct < 30.0 {
        SAVINGS_MODERATE
    } else {
        SAVINGS_HEALTHY
    }
}

pub struct AdviceGenerator {
    templates: AdviceTemplates,
}

impl AdviceGenerator {
    pub fn new(templates: AdviceTemplates) -> Self {
        Self { templates }
    }

    pub fn generate(&self, totals: &CategoryTotals) -> Advice {
        let income = totals.get(&Category::income()).copied().unwrap_or(0.0);

        if income == 0.0 {
            return Advice {
                lines: vec![NO_INCOME.to_string()],
            };
        }

        let mut lines = Vec::with_capacity(totals.len() + 1);
        for (category, total) in totals {
            if category.is_income() {
                lines.push(self.templates.income.replace("{amount}", &format_amount(*total)));
                continue;
            }

            let pct = total / income * 100.0;
            let line = self
                .templates
                .template_for(category)
                .replace("{pct}", &format!("{:.1}", pct))
                .replace("{tip}", spending_tip(pct));
            lines.push(line);
        }

        let total_expenses: f64 = totals
            .iter()
            .filter(|(cat, _)| !cat.is_income())
            .map(|(_, amt)| amt)
            .sum();
        let savings_pct = (income - total_expenses) / income * 100.0;
        lines.push(savings_remark(savings_pct).to_string());

        Advice { lines }
    }
}

impl Default for AdviceGenerator {
    fn default() -> Self {
        Self::new(AdviceTemplates::default())
    }
}
