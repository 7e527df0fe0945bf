//! Configuration access port trait.

use crate::domain::error::JournalError;
use chrono::NaiveDate;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;

    /// `YYYY-MM-DD` value; blank counts as absent.
    fn get_date(&self, section: &str, key: &str) -> Result<Option<NaiveDate>, JournalError> {
        match self.get_string(section, key) {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map(Some)
                .map_err(|_| JournalError::ConfigInvalid {
                    section: section.to_string(),
                    key: key.to_string(),
                    reason: format!("invalid {key} format, expected YYYY-MM-DD"),
                }),
        }
    }
}
