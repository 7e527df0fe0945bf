//! Domain error types.
//!
//! Insufficient data is not represented here: components that cannot compute
//! a result return `Option` instead of failing.

/// Top-level error type for tradejournal.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("import error: {reason}")]
    Import { reason: String },

    #[error("invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&JournalError> for std::process::ExitCode {
    fn from(err: &JournalError) -> Self {
        let code: u8 = match err {
            JournalError::Io(_) => 1,
            JournalError::ConfigParse { .. } | JournalError::ConfigInvalid { .. } => 2,
            JournalError::Import { .. } | JournalError::InvalidRecord { .. } => 3,
            JournalError::InvalidArgument { .. } => 4,
            JournalError::Report { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
