#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tradejournal::domain::analysis_config::AnalysisConfig;
use tradejournal::domain::error::JournalError;
pub use tradejournal::domain::operation::OperationRecord;
use tradejournal::domain::report::AnalysisReport;
use tradejournal::ports::operation_port::OperationPort;
use tradejournal::ports::report_port::ReportPort;

pub struct MockOperationPort {
    pub records: Vec<OperationRecord>,
    pub error: Option<String>,
}

impl MockOperationPort {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            error: None,
        }
    }

    pub fn with_records(mut self, records: Vec<OperationRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl OperationPort for MockOperationPort {
    fn fetch_operations(&self) -> Result<Vec<OperationRecord>, JournalError> {
        if let Some(reason) = &self.error {
            return Err(JournalError::Import {
                reason: reason.clone(),
            });
        }
        Ok(self.records.clone())
    }
}

/// Captures written reports instead of touching the filesystem.
#[derive(Default)]
pub struct RecordingReportPort {
    pub written: RefCell<Vec<(PathBuf, AnalysisReport)>>,
}

impl ReportPort for RecordingReportPort {
    fn write(&self, report: &AnalysisReport, output_path: &Path) -> Result<(), JournalError> {
        self.written
            .borrow_mut()
            .push((output_path.to_path_buf(), report.clone()));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_op(date: &str, time: &str, result: f64) -> OperationRecord {
    OperationRecord {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        time: NaiveTime::parse_from_str(time, "%H:%M:%S").unwrap(),
        result,
        contracts: 1,
        strategy: None,
    }
}

pub fn make_tagged_op(date: &str, time: &str, result: f64, strategy: &str) -> OperationRecord {
    OperationRecord {
        strategy: Some(strategy.to_string()),
        ..make_op(date, time, result)
    }
}

/// One 10:00 operation per consecutive calendar day starting at `start`.
pub fn generate_days(start: &str, results: &[f64]) -> Vec<OperationRecord> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    results
        .iter()
        .enumerate()
        .map(|(i, &result)| OperationRecord {
            date: start + chrono::Duration::days(i as i64),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            result,
            contracts: 1,
            strategy: None,
        })
        .collect()
}

pub fn sample_config() -> AnalysisConfig {
    AnalysisConfig {
        initial_capital: 1000.0,
        monte_carlo_runs: 200,
        seed: Some(42),
        ..AnalysisConfig::new(date(2024, 5, 20))
    }
}
