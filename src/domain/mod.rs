//! Core domain types and pure analytics.

pub mod operation;
pub mod aggregator;
pub mod streaks;
pub mod capital;
pub mod monte_carlo;
pub mod signals;
pub mod downsample;
pub mod analysis_config;
pub mod config_validation;
pub mod report;
pub mod error;
