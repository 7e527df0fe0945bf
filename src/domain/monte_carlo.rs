//! Monte Carlo resampling of daily results.
//!
//! Each run is a uniform random permutation of the historical daily results
//! (sampling without replacement), so every run holds exactly the historical
//! multiset and only the ordering varies. The percentile envelope is a
//! per-day cross-section over all runs, not a set of representative paths.

use crate::domain::downsample::{MAX_CHART_POINTS, downsample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

pub const DEFAULT_RUNS: usize = 500;
/// Fewer days than this and there is nothing to reorder.
pub const MIN_DAYS: usize = 2;

pub const LOWER_PERCENTILE: f64 = 0.05;
pub const MEDIAN_PERCENTILE: f64 = 0.5;
pub const UPPER_PERCENTILE: f64 = 0.95;

/// Source of uniform indices for shuffling.
pub trait RandomSource {
    /// Uniform integer in `0..upper`; `upper` is always at least 1.
    fn next_index(&mut self, upper: usize) -> usize;
}

impl RandomSource for StdRng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// Seeded generator when `seed` is given, entropy-seeded otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopePoint {
    pub day_index: usize,
    pub best: f64,
    pub median: f64,
    pub worst: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloResult {
    pub runs: usize,
    pub days: usize,
    pub envelope: Vec<EnvelopePoint>,
    /// Share of runs finishing above zero, 0..=100.
    pub profit_probability: f64,
    pub median_result: f64,
    pub var95: f64,
    pub best_scenario95: f64,
}

/// Fisher–Yates shuffle in place.
pub fn shuffle<T, R: RandomSource + ?Sized>(values: &mut [T], rng: &mut R) {
    for i in (1..values.len()).rev() {
        let j = rng.next_index(i + 1);
        values.swap(i, j);
    }
}

/// Running sum starting at 0; `len + 1` points.
pub fn cumulative_path(values: &[f64]) -> Vec<f64> {
    let mut path = Vec::with_capacity(values.len() + 1);
    let mut total = 0.0;
    path.push(total);
    for v in values {
        total += v;
        path.push(total);
    }
    path
}

/// Element at `floor(n * p)` of an ascending-sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = ((sorted.len() as f64 * p).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Resamples `daily_results` `runs` times.
///
/// Returns `None` when fewer than [`MIN_DAYS`] days are available or `runs`
/// is zero.
pub fn run_monte_carlo<R: RandomSource + ?Sized>(
    daily_results: &[f64],
    runs: usize,
    rng: &mut R,
) -> Option<MonteCarloResult> {
    if daily_results.len() < MIN_DAYS || runs == 0 {
        tracing::debug!(
            days = daily_results.len(),
            runs,
            "not enough history to resample"
        );
        return None;
    }

    tracing::info!(days = daily_results.len(), runs, "running monte carlo");

    let path_len = daily_results.len() + 1;
    let mut columns: Vec<Vec<f64>> = (0..path_len).map(|_| Vec::with_capacity(runs)).collect();
    let mut finals = Vec::with_capacity(runs);
    let mut order = daily_results.to_vec();

    for _ in 0..runs {
        order.copy_from_slice(daily_results);
        shuffle(&mut order, rng);
        let path = cumulative_path(&order);
        for (column, &value) in columns.iter_mut().zip(&path) {
            column.push(value);
        }
        finals.push(path[path_len - 1]);
    }

    finals.sort_by(f64::total_cmp);
    let profitable = finals.iter().filter(|&&f| f > 0.0).count();

    let envelope: Vec<EnvelopePoint> = columns
        .into_iter()
        .enumerate()
        .map(|(day_index, mut column)| {
            column.sort_by(f64::total_cmp);
            EnvelopePoint {
                day_index,
                best: percentile(&column, UPPER_PERCENTILE),
                median: percentile(&column, MEDIAN_PERCENTILE),
                worst: percentile(&column, LOWER_PERCENTILE),
            }
        })
        .collect();

    Some(MonteCarloResult {
        runs,
        days: daily_results.len(),
        envelope: downsample(&envelope, MAX_CHART_POINTS),
        profit_probability: profitable as f64 / runs as f64 * 100.0,
        median_result: percentile(&finals, MEDIAN_PERCENTILE),
        var95: percentile(&finals, LOWER_PERCENTILE),
        best_scenario95: percentile(&finals, UPPER_PERCENTILE),
    })
}
