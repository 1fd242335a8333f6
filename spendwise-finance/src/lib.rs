//! spendwise-finance: the recommendation pipeline over a stored ledger

pub mod pipeline;

pub use pipeline::{Advisor, Insights, Outcome, Report};
