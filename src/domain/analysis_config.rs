//! Parameters for one analysis run.

use crate::domain::monte_carlo::DEFAULT_RUNS;
use chrono::NaiveDate;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;
pub const MAX_MONTE_CARLO_RUNS: usize = 100_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub initial_capital: f64,
    pub monte_carlo_runs: usize,
    /// Fixed seed for reproducible resampling; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Any date inside the month treated as the current period.
    pub reference_date: NaiveDate,
    pub strategy: Option<String>,
}

impl AnalysisConfig {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            monte_carlo_runs: DEFAULT_RUNS,
            seed: None,
            reference_date,
            strategy: None,
        }
    }
}
