//! Savings goal progress estimated from current net savings

use serde::Serialize;
use std::collections::BTreeMap;

use crate::finance::round_to;

/// A savings goal funded by a fixed share of net savings
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDescriptor {
    pub name: String,
    pub target: f64,
    /// Share of net savings allocated to this goal (0.0 - 1.0)
    pub allocation: f64,
}

impl GoalDescriptor {
    pub fn new(name: impl Into<String>, target: f64, allocation: f64) -> Self {
        Self {
            name: name.into(),
            target,
            allocation: allocation.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalStatus {
    pub current: f64,
    pub target: f64,
}

/// The set of goals tracked in every report
#[derive(Debug, Clone, PartialEq)]
pub struct GoalPlan {
    pub goals: Vec<GoalDescriptor>,
}

impl GoalPlan {
    /// Progress of every goal given `net_savings`. Negative savings give
    /// negative progress; nothing is clamped.
    pub fn progress(&self, net_savings: f64) -> BTreeMap<String, GoalStatus> {
        self.goals
            .iter()
            .map(|g| {
                (
                    g.name.clone(),
                    GoalStatus {
                        current: round_to(net_savings * g.allocation, 2),
                        target: g.target,
                    },
                )
            })
            .collect()
    }
}

impl Default for GoalPlan {
    fn default() -> Self {
        Self {
            goals: vec![
                GoalDescriptor::new("Emergency Fund", 10000.0, 0.3),
                GoalDescriptor::new("Vacation Fund", 5000.0, 0.2),
                GoalDescriptor::new("Investment Goal", 20000.0, 0.5),
            ],
        }
    }
}
