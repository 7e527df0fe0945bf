//! CLI integration tests.
//!
//! Tests cover:
//! - Config resolution from INI files on disk plus command-line overrides
//! - CSV import through the real adapter feeding the pipeline
//! - JSON report output
//! - Signal grid command path

mod common;

use chrono::Weekday;
use clap::Parser;
use common::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tradejournal::adapters::csv_adapter::CsvOperationAdapter;
use tradejournal::adapters::json_report_adapter::JsonReportAdapter;
use tradejournal::cli::{
    Cli, Overrides, format_report, resolve_config, run, run_analysis_pipeline, signals_for,
};
use tradejournal::domain::error::JournalError;
use tradejournal::domain::signals::SlotSignal;
use tradejournal::ports::operation_port::OperationPort;

const OPERATIONS_CSV: &str = "date,time,result,contracts,strategy\n\
    2024-04-01,10:15:00,120,1,Scalp\n\
    2024-04-02,11:00:00,-40,2,Swing\n\
    2024-04-03,10:30:00,75,1,Scalp\n\
    2024-05-06,10:45:00,30,1,Scalp\n\
    2024-05-07,11:20:00,-15,1,Swing\n";

const CONFIG_INI: &str = "[analysis]\n\
    initial_capital = 5000\n\
    monte_carlo_runs = 300\n\
    seed = 17\n\
    reference_date = 2024-05-15\n";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

mod config_resolution {
    use super::*;

    #[test]
    fn no_config_file_uses_defaults() {
        let config = resolve_config(None, &Overrides::default(), date(2024, 6, 1)).unwrap();
        assert_eq!(config.initial_capital, 10_000.0);
        assert_eq!(config.monte_carlo_runs, 500);
        assert_eq!(config.seed, None);
        assert_eq!(config.reference_date, date(2024, 6, 1));
        assert_eq!(config.strategy, None);
    }

    #[test]
    fn config_file_values_are_used() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "journal.ini", CONFIG_INI);

        let config =
            resolve_config(Some(&path), &Overrides::default(), date(2024, 6, 1)).unwrap();
        assert_eq!(config.initial_capital, 5000.0);
        assert_eq!(config.monte_carlo_runs, 300);
        assert_eq!(config.seed, Some(17));
        assert_eq!(config.reference_date, date(2024, 5, 15));
    }

    #[test]
    fn overrides_beat_config_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "journal.ini", CONFIG_INI);
        let overrides = Overrides {
            capital: Some(750.0),
            seed: Some(1),
            strategy: Some("Swing".into()),
            ..Overrides::default()
        };

        let config = resolve_config(Some(&path), &overrides, date(2024, 6, 1)).unwrap();
        assert_eq!(config.initial_capital, 750.0);
        assert_eq!(config.monte_carlo_runs, 300);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.strategy.as_deref(), Some("Swing"));
    }

    #[test]
    fn invalid_config_value_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bad.ini", "[analysis]\nmonte_carlo_runs = 0\n");

        let err =
            resolve_config(Some(&path), &Overrides::default(), date(2024, 6, 1)).unwrap_err();
        assert!(matches!(err, JournalError::ConfigInvalid { ref key, .. } if key == "monte_carlo_runs"));
    }

    #[test]
    fn missing_config_file_is_a_parse_error() {
        let path = PathBuf::from("/nonexistent/journal.ini");
        let err =
            resolve_config(Some(&path), &Overrides::default(), date(2024, 6, 1)).unwrap_err();
        assert!(matches!(err, JournalError::ConfigParse { .. }));
    }
}

mod analysis {
    use super::*;

    #[test]
    fn csv_to_json_report() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "ops.csv", OPERATIONS_CSV);
        let ini = write_file(&dir, "journal.ini", CONFIG_INI);
        let output = dir.path().join("report.json");

        let config = resolve_config(Some(&ini), &Overrides::default(), date(2024, 6, 1)).unwrap();
        let port = CsvOperationAdapter::new(input);
        let report =
            run_analysis_pipeline(&port, &config, Some(output.as_path()), &JsonReportAdapter::new())
                .unwrap();

        assert_eq!(report.summary.operations, 5);
        assert_eq!(report.capital.final_balance, 5170.0);
        assert_eq!(report.monte_carlo.as_ref().map(|mc| mc.runs), Some(300));

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["capital"]["finalBalance"], 5170.0);
        assert_eq!(value["signals"]["referenceMonth"], "2024-05");
        assert_eq!(value["monteCarlo"]["runs"], 300);
    }

    #[test]
    fn strategy_override_narrows_the_report() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "ops.csv", OPERATIONS_CSV);
        let overrides = Overrides {
            strategy: Some("scalp".into()),
            seed: Some(3),
            ..Overrides::default()
        };

        let config = resolve_config(None, &overrides, date(2024, 5, 20)).unwrap();
        let report = run_analysis_pipeline(
            &CsvOperationAdapter::new(input),
            &config,
            None,
            &RecordingReportPort::default(),
        )
        .unwrap();

        assert_eq!(report.summary.operations, 3);
        assert_eq!(report.summary.total_result, 225.0);
        assert!(format_report(&report).contains("Strategy:         scalp"));
    }

    #[test]
    fn malformed_csv_stops_the_pipeline() {
        let dir = TempDir::new().unwrap();
        let input = write_file(
            &dir,
            "ops.csv",
            "date,time,result,contracts\n2024-04-01,10:00:00,12,1\n2024-13-01,10:00:00,5,1\n",
        );
        let config = resolve_config(None, &Overrides::default(), date(2024, 5, 20)).unwrap();
        let err = run_analysis_pipeline(
            &CsvOperationAdapter::new(input),
            &config,
            None,
            &RecordingReportPort::default(),
        )
        .unwrap_err();
        assert!(matches!(err, JournalError::InvalidRecord { line: 3, .. }));
    }

    #[test]
    fn console_summary_lists_every_section() {
        let config = resolve_config(None, &Overrides::default(), date(2024, 5, 20)).unwrap();
        let records = CsvOperationAdapter::parse(OPERATIONS_CSV).unwrap();
        let port = MockOperationPort::new().with_records(records);
        let report =
            run_analysis_pipeline(&port, &config, None, &RecordingReportPort::default()).unwrap();

        let text = format_report(&report);
        for heading in ["Journal", "Capital", "Monte Carlo", "Streaks", "Signals (2024-05)"] {
            assert!(text.contains(&format!("=== {heading} ===")), "missing {heading}");
        }
    }

    #[test]
    fn run_analyze_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "ops.csv", OPERATIONS_CSV);
        let output = dir.path().join("out.json");

        let cli = Cli::try_parse_from([
            "tradejournal",
            "analyze",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--seed",
            "5",
            "--runs",
            "50",
            "--reference-date",
            "2024-05-15",
        ])
        .unwrap();
        run(cli);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["monteCarlo"]["runs"], 50);
    }
}

mod signals {
    use super::*;

    #[test]
    fn signals_from_csv() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "ops.csv", OPERATIONS_CSV);
        let config = resolve_config(None, &Overrides::default(), date(2024, 5, 20)).unwrap();

        let grid = signals_for(&CsvOperationAdapter::new(input), &config).unwrap();

        // Monday 10h: +120 in April, +30 in May
        assert_eq!(grid.cell(Weekday::Mon, 10).unwrap().signal, SlotSignal::Ligar);
        // Tuesday 11h: -40 in April, -15 in May
        assert_eq!(grid.cell(Weekday::Tue, 11).unwrap().signal, SlotSignal::NaoLigar);
        // Wednesday 10h: April only
        assert_eq!(grid.cell(Weekday::Wed, 10).unwrap().signal, SlotSignal::SemDados);
        assert_eq!(grid.summary.score, 50.0);
    }

    #[test]
    fn signals_respect_strategy_filter() {
        let records = CsvOperationAdapter::parse(OPERATIONS_CSV).unwrap();
        let port = MockOperationPort::new().with_records(records);
        let overrides = Overrides {
            strategy: Some("Swing".into()),
            ..Overrides::default()
        };
        let config = resolve_config(None, &overrides, date(2024, 5, 20)).unwrap();

        let grid = signals_for(&port, &config).unwrap();
        assert_eq!(grid.summary.nao_ligar, 1);
        assert_eq!(grid.summary.ligar, 0);
        assert_eq!(grid.summary.score, 0.0);
    }

    #[test]
    fn strategies_listed_from_csv() {
        let records = CsvOperationAdapter::parse(OPERATIONS_CSV).unwrap();
        let port = MockOperationPort::new().with_records(records);
        assert_eq!(port.list_strategies().unwrap(), vec!["Scalp", "Swing"]);
    }
}
