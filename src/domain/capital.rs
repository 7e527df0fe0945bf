//! Capital trajectory replay: equity curve, drawdown and ruin detection.

use crate::domain::aggregator::DailyAggregate;
use crate::domain::downsample::{MAX_CHART_POINTS, downsample};
use crate::domain::error::JournalError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalPoint {
    pub day_index: usize,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownPoint {
    pub day_index: usize,
    pub drawdown_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalSimulation {
    pub initial_capital: f64,
    /// Chart-ready trajectory, downsampled when longer than a year of points.
    pub trajectory: Vec<CapitalPoint>,
    pub drawdowns: Vec<DrawdownPoint>,
    pub final_balance: f64,
    pub ruin_day_index: Option<usize>,
    pub yield_percent: f64,
    pub max_drawdown_percent: f64,
}

impl CapitalSimulation {
    pub fn is_ruined(&self) -> bool {
        self.ruin_day_index.is_some()
    }
}

pub fn simulate_capital(
    daily: &[DailyAggregate],
    initial_capital: f64,
) -> Result<CapitalSimulation, JournalError> {
    let results: Vec<f64> = daily.iter().map(|d| d.net_result).collect();
    simulate_capital_from_results(&results, initial_capital)
}

/// Replays daily net results in order against `initial_capital`.
///
/// Point 0 of the trajectory is the starting balance; point `n` is the balance
/// after day `n`. The replay does not stop at ruin.
pub fn simulate_capital_from_results(
    results: &[f64],
    initial_capital: f64,
) -> Result<CapitalSimulation, JournalError> {
    if !(initial_capital.is_finite() && initial_capital > 0.0) {
        return Err(JournalError::InvalidArgument {
            name: "initial_capital".into(),
            reason: format!("must be a positive number, got {initial_capital}"),
        });
    }

    let mut balance = initial_capital;
    let mut peak = initial_capital;
    let mut max_drawdown = 0.0_f64;
    let mut ruin_day_index = None;

    let mut trajectory = Vec::with_capacity(results.len() + 1);
    let mut drawdowns = Vec::with_capacity(results.len() + 1);
    trajectory.push(CapitalPoint {
        day_index: 0,
        balance,
    });
    drawdowns.push(DrawdownPoint {
        day_index: 0,
        drawdown_percent: 0.0,
    });

    for (i, &result) in results.iter().enumerate() {
        let day_index = i + 1;
        balance += result;
        if balance > peak {
            peak = balance;
        }

        let drawdown = if peak > 0.0 {
            (peak - balance) / peak * 100.0
        } else {
            0.0
        };
        max_drawdown = max_drawdown.max(drawdown);

        if ruin_day_index.is_none() && balance <= 0.0 {
            ruin_day_index = Some(day_index);
        }

        trajectory.push(CapitalPoint { day_index, balance });
        drawdowns.push(DrawdownPoint {
            day_index,
            drawdown_percent: drawdown,
        });
    }

    let yield_percent = (balance - initial_capital) / initial_capital * 100.0;

    tracing::debug!(
        days = results.len(),
        final_balance = balance,
        max_drawdown,
        ?ruin_day_index,
        "capital replay finished"
    );

    Ok(CapitalSimulation {
        initial_capital,
        trajectory: downsample(&trajectory, MAX_CHART_POINTS),
        drawdowns: downsample(&drawdowns, MAX_CHART_POINTS),
        final_balance: balance,
        ruin_day_index,
        yield_percent,
        max_drawdown_percent: max_drawdown,
    })
}
