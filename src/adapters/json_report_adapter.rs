//! JSON report adapter.

use crate::domain::error::JournalError;
use crate::domain::report::AnalysisReport;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

#[derive(Debug, Default)]
pub struct JsonReportAdapter {
    pub compact: bool,
}

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, report: &AnalysisReport) -> Result<String, JournalError> {
        let rendered = if self.compact {
            serde_json::to_string(report)
        } else {
            serde_json::to_string_pretty(report)
        };
        rendered.map_err(|e| JournalError::Report {
            reason: format!("failed to serialize report: {e}"),
        })
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, report: &AnalysisReport, output_path: &Path) -> Result<(), JournalError> {
        let json = self.render(report)?;
        fs::write(output_path, json).map_err(|e| JournalError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        })?;
        tracing::info!(path = %output_path.display(), "report written");
        Ok(())
    }
}
