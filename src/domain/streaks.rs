//! Win/loss streaks and recovery statistics over daily results.
//!
//! Two recovery measures are produced side by side:
//! - single-day recovery: the result of the day after every losing day;
//! - streak recovery: the result of the day that ends a run of two or more
//!   same-signed days.

use crate::domain::aggregator::DailyAggregate;
use serde::Serialize;

/// Minimum run length whose terminating day is recorded.
pub const MIN_STREAK_LEN: u32 = 2;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub max_win_streak: u32,
    pub max_loss_streak: u32,
    pub after_win_streak_results: Vec<f64>,
    pub after_loss_streak_results: Vec<f64>,
    pub avg_after_win_streak: Option<f64>,
    pub avg_after_loss_streak: Option<f64>,
    pub recovery_events: usize,
    pub avg_recovery_after_loss: Option<f64>,
    /// Fraction (0..=1) of post-loss days that closed positive.
    pub recovery_rate: Option<f64>,
}

impl StreakStats {
    pub fn after_win_streak_count(&self) -> usize {
        self.after_win_streak_results.len()
    }

    pub fn after_loss_streak_count(&self) -> usize {
        self.after_loss_streak_results.len()
    }
}

pub fn analyze_streaks(daily: &[DailyAggregate]) -> StreakStats {
    let results: Vec<f64> = daily.iter().map(|d| d.net_result).collect();
    analyze_result_streaks(&results)
}

/// Same as [`analyze_streaks`] over bare daily net results in date order.
pub fn analyze_result_streaks(results: &[f64]) -> StreakStats {
    let mut stats = StreakStats::default();

    // Positive = consecutive winning days, negative = consecutive losing days.
    let mut streak: i64 = 0;

    for &result in results {
        if result > 0.0 {
            if streak < 0 {
                if streak.unsigned_abs() >= MIN_STREAK_LEN as u64 {
                    stats.after_loss_streak_results.push(result);
                }
                streak = 0;
            }
            streak += 1;
        } else if result < 0.0 {
            if streak > 0 {
                if streak >= MIN_STREAK_LEN as i64 {
                    stats.after_win_streak_results.push(result);
                }
                streak = 0;
            }
            streak -= 1;
        } else {
            streak = 0;
        }

        if streak > 0 {
            stats.max_win_streak = stats.max_win_streak.max(streak as u32);
        } else if streak < 0 {
            stats.max_loss_streak = stats.max_loss_streak.max(streak.unsigned_abs() as u32);
        }
    }

    stats.avg_after_win_streak = mean(&stats.after_win_streak_results);
    stats.avg_after_loss_streak = mean(&stats.after_loss_streak_results);

    let next_day_results: Vec<f64> = results
        .windows(2)
        .filter(|w| w[0] < 0.0)
        .map(|w| w[1])
        .collect();

    stats.recovery_events = next_day_results.len();
    stats.avg_recovery_after_loss = mean(&next_day_results);
    if !next_day_results.is_empty() {
        let recovered = next_day_results.iter().filter(|&&r| r > 0.0).count();
        stats.recovery_rate = Some(recovered as f64 / next_day_results.len() as f64);
    }

    stats
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
