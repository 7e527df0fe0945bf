//! Report generation port trait.

use crate::domain::error::JournalError;
use crate::domain::report::AnalysisReport;
use std::path::Path;

/// Port for persisting an analysis report.
pub trait ReportPort {
    fn write(&self, report: &AnalysisReport, output_path: &Path) -> Result<(), JournalError>;
}
