//! CSV operations file adapter.
//!
//! Expected header: `date,time,result,contracts[,strategy]` in any column
//! order. Dates are `YYYY-MM-DD`, times `HH:MM:SS` or `HH:MM`.

use crate::domain::error::JournalError;
use crate::domain::operation::OperationRecord;
use crate::ports::operation_port::OperationPort;
use chrono::{NaiveDate, NaiveTime};
use std::fs;
use std::path::PathBuf;

pub struct CsvOperationAdapter {
    path: PathBuf,
}

struct Columns {
    date: usize,
    time: usize,
    result: usize,
    contracts: usize,
    strategy: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, JournalError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| JournalError::Import {
                reason: format!("missing {name} column"),
            })
        };
        Ok(Self {
            date: require("date")?,
            time: require("time")?,
            result: require("result")?,
            contracts: require("contracts")?,
            strategy: find("strategy"),
        })
    }
}

impl CsvOperationAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parses CSV text already in memory.
    pub fn parse(content: &str) -> Result<Vec<OperationRecord>, JournalError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = rdr.headers().map_err(|e| JournalError::Import {
            reason: format!("CSV header error: {}", e),
        })?;
        let columns = Columns::from_headers(headers)?;

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result.map_err(|e| JournalError::Import {
                reason: format!("CSV parse error: {}", e),
            })?;
            let line = row.position().map(|p| p.line() as usize).unwrap_or(0);
            records.push(parse_row(&row, &columns, line)?);
        }

        tracing::debug!(records = records.len(), "parsed operations CSV");
        Ok(records)
    }
}

fn field<'r>(
    row: &'r csv::StringRecord,
    idx: usize,
    name: &str,
    line: usize,
) -> Result<&'r str, JournalError> {
    match row.get(idx) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(JournalError::InvalidRecord {
            line,
            reason: format!("missing {name}"),
        }),
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

fn parse_row(
    row: &csv::StringRecord,
    columns: &Columns,
    line: usize,
) -> Result<OperationRecord, JournalError> {
    let invalid = |reason: String| JournalError::InvalidRecord { line, reason };

    let date_str = field(row, columns.date, "date", line)?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| invalid(format!("invalid date {date_str:?}: {e}")))?;

    let time_str = field(row, columns.time, "time", line)?;
    let time = parse_time(time_str).ok_or_else(|| invalid(format!("invalid time {time_str:?}")))?;

    let result_str = field(row, columns.result, "result", line)?;
    let result: f64 = result_str
        .parse()
        .map_err(|e| invalid(format!("invalid result {result_str:?}: {e}")))?;
    if !result.is_finite() {
        return Err(invalid(format!("result must be finite, got {result_str:?}")));
    }

    let contracts_str = field(row, columns.contracts, "contracts", line)?;
    let contracts: i64 = contracts_str
        .parse()
        .map_err(|e| invalid(format!("invalid contracts {contracts_str:?}: {e}")))?;

    let strategy = columns
        .strategy
        .and_then(|idx| row.get(idx))
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(OperationRecord {
        date,
        time,
        result,
        contracts,
        strategy,
    })
}

impl OperationPort for CsvOperationAdapter {
    fn fetch_operations(&self) -> Result<Vec<OperationRecord>, JournalError> {
        let content = fs::read_to_string(&self.path).map_err(|e| JournalError::Import {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        Self::parse(&content)
    }
}
