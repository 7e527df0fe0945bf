//! Configuration validation.
//!
//! Checks the `[analysis]` section before any record is loaded and turns it
//! into an [`AnalysisConfig`].

use crate::domain::analysis_config::{
    AnalysisConfig, DEFAULT_INITIAL_CAPITAL, MAX_MONTE_CARLO_RUNS,
};
use crate::domain::error::JournalError;
use crate::domain::monte_carlo::DEFAULT_RUNS;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const SECTION: &str = "analysis";

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), JournalError> {
    validate_initial_capital(config)?;
    validate_runs(config)?;
    validate_seed(config)?;
    validate_reference_date(config)?;
    Ok(())
}

/// Validates and builds the config. `today` is used when no reference date
/// is configured.
pub fn build_analysis_config(
    config: &dyn ConfigPort,
    today: NaiveDate,
) -> Result<AnalysisConfig, JournalError> {
    validate_analysis_config(config)?;

    Ok(AnalysisConfig {
        initial_capital: config.get_double(SECTION, "initial_capital", DEFAULT_INITIAL_CAPITAL),
        monte_carlo_runs: parse_runs(config)?.unwrap_or(DEFAULT_RUNS),
        seed: parse_seed(config)?,
        reference_date: config.get_date(SECTION, "reference_date")?.unwrap_or(today),
        strategy: config
            .get_string(SECTION, "strategy")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    })
}

fn invalid(key: &str, reason: impl Into<String>) -> JournalError {
    JournalError::ConfigInvalid {
        section: SECTION.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), JournalError> {
    if let Some(raw) = config.get_string(SECTION, "initial_capital") {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| invalid("initial_capital", "initial_capital must be a number"))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid("initial_capital", "initial_capital must be positive"));
        }
    }
    Ok(())
}

fn parse_runs(config: &dyn ConfigPort) -> Result<Option<usize>, JournalError> {
    match config.get_string(SECTION, "monte_carlo_runs") {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| invalid("monte_carlo_runs", "monte_carlo_runs must be a whole number")),
    }
}

fn validate_runs(config: &dyn ConfigPort) -> Result<(), JournalError> {
    if let Some(runs) = parse_runs(config)? {
        if runs == 0 || runs > MAX_MONTE_CARLO_RUNS {
            return Err(invalid(
                "monte_carlo_runs",
                format!("monte_carlo_runs must be between 1 and {MAX_MONTE_CARLO_RUNS}"),
            ));
        }
    }
    Ok(())
}

fn parse_seed(config: &dyn ConfigPort) -> Result<Option<u64>, JournalError> {
    match config.get_string(SECTION, "seed") {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| invalid("seed", "seed must be a non-negative integer")),
    }
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), JournalError> {
    parse_seed(config).map(|_| ())
}

fn validate_reference_date(config: &dyn ConfigPort) -> Result<(), JournalError> {
    config.get_date(SECTION, "reference_date").map(|_| ())
}
