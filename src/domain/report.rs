//! Bundles every analysis over one set of records into a single value.

use crate::domain::aggregator::{DailyAggregate, aggregate_daily, daily_results};
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::capital::{CapitalSimulation, simulate_capital};
use crate::domain::error::JournalError;
use crate::domain::monte_carlo::{MonteCarloResult, RandomSource, run_monte_carlo};
use crate::domain::operation::{OperationRecord, filter_by_strategy};
use crate::domain::signals::{SignalGrid, classify_slots};
use crate::domain::streaks::{StreakStats, analyze_streaks};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayResult {
    pub date: NaiveDate,
    pub net_result: f64,
}

impl From<&DailyAggregate> for DayResult {
    fn from(d: &DailyAggregate) -> Self {
        Self {
            date: d.date,
            net_result: d.net_result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSummary {
    pub total_result: f64,
    pub operations: usize,
    pub total_contracts: i64,
    pub trading_days: usize,
    pub winning_days: usize,
    pub losing_days: usize,
    pub flat_days: usize,
    pub best_day: Option<DayResult>,
    pub worst_day: Option<DayResult>,
    /// Fraction of winning operations, `None` without operations.
    pub win_rate: Option<f64>,
}

impl JournalSummary {
    pub fn compute(records: &[OperationRecord], daily: &[DailyAggregate]) -> Self {
        let operations = records.len();
        let wins = records.iter().filter(|r| r.is_win()).count();

        let best_day = daily
            .iter()
            .max_by(|a, b| a.net_result.total_cmp(&b.net_result))
            .map(DayResult::from);
        let worst_day = daily
            .iter()
            .min_by(|a, b| a.net_result.total_cmp(&b.net_result))
            .map(DayResult::from);

        JournalSummary {
            total_result: records.iter().map(|r| r.result).sum(),
            operations,
            total_contracts: records.iter().map(|r| r.contracts).sum(),
            trading_days: daily.len(),
            winning_days: daily.iter().filter(|d| d.net_result > 0.0).count(),
            losing_days: daily.iter().filter(|d| d.net_result < 0.0).count(),
            flat_days: daily.iter().filter(|d| d.net_result == 0.0).count(),
            best_day,
            worst_day,
            win_rate: (operations > 0).then(|| wins as f64 / operations as f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub strategy: Option<String>,
    pub summary: JournalSummary,
    pub daily: Vec<DailyAggregate>,
    pub capital: CapitalSimulation,
    /// `None` when there is too little history to resample.
    pub monte_carlo: Option<MonteCarloResult>,
    pub streaks: StreakStats,
    pub signals: SignalGrid,
}

impl AnalysisReport {
    pub fn build<R: RandomSource + ?Sized>(
        records: &[OperationRecord],
        config: &AnalysisConfig,
        rng: &mut R,
    ) -> Result<Self, JournalError> {
        let filtered;
        let records = match config.strategy.as_deref() {
            Some(label) => {
                filtered = filter_by_strategy(records, label);
                tracing::info!(
                    strategy = label,
                    kept = filtered.len(),
                    "filtered records by strategy"
                );
                &filtered[..]
            }
            None => records,
        };

        let daily = aggregate_daily(records);
        let results = daily_results(&daily);

        let capital = simulate_capital(&daily, config.initial_capital)?;
        let monte_carlo = run_monte_carlo(&results, config.monte_carlo_runs, rng);
        let streaks = analyze_streaks(&daily);
        let signals = classify_slots(records, config.reference_date);
        let summary = JournalSummary::compute(records, &daily);

        Ok(AnalysisReport {
            strategy: config.strategy.clone(),
            summary,
            daily,
            capital,
            monte_carlo,
            streaks,
            signals,
        })
    }
}
