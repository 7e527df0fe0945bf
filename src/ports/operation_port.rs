//! Source of journal operations.

use crate::domain::error::JournalError;
use crate::domain::operation::{OperationRecord, distinct_strategies};

pub trait OperationPort {
    /// All records, already validated.
    fn fetch_operations(&self) -> Result<Vec<OperationRecord>, JournalError>;

    fn list_strategies(&self) -> Result<Vec<String>, JournalError> {
        Ok(distinct_strategies(&self.fetch_operations()?))
    }
}
