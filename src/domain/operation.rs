//! A single closed trade as recorded in the journal.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub result: f64,
    pub contracts: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

impl OperationRecord {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn is_win(&self) -> bool {
        self.result > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.result < 0.0
    }
}

/// Keep only records tagged with `label` (case-insensitive, surrounding
/// whitespace ignored). Untagged records never match.
pub fn filter_by_strategy(records: &[OperationRecord], label: &str) -> Vec<OperationRecord> {
    let wanted = label.trim();
    records
        .iter()
        .filter(|r| {
            r.strategy
                .as_deref()
                .is_some_and(|s| s.trim().eq_ignore_ascii_case(wanted))
        })
        .cloned()
        .collect()
}

/// Sorted, de-duplicated strategy labels present in `records`.
pub fn distinct_strategies(records: &[OperationRecord]) -> Vec<String> {
    let mut labels: Vec<String> = records
        .iter()
        .filter_map(|r| r.strategy.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    labels.sort();
    labels.dedup();
    labels
}
