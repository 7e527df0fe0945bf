//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvOperationAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::aggregator::{FIRST_SLOT_HOUR, LAST_SLOT_HOUR, TRADING_WEEKDAYS};
use crate::domain::analysis_config::{AnalysisConfig, MAX_MONTE_CARLO_RUNS};
use crate::domain::config_validation::build_analysis_config;
use crate::domain::error::JournalError;
use crate::domain::monte_carlo::{MIN_DAYS, make_rng};
use crate::domain::operation::filter_by_strategy;
use crate::domain::report::AnalysisReport;
use crate::domain::signals::{SignalGrid, classify_slots};
use crate::ports::operation_port::OperationPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "tradejournal", about = "Trading journal performance analytics")]
pub struct Cli {
    /// Log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

/// Values that take precedence over the `[analysis]` config section.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    #[arg(long)]
    pub capital: Option<f64>,
    #[arg(long)]
    pub runs: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub reference_date: Option<NaiveDate>,
    #[arg(long)]
    pub strategy: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every analysis and print a summary
    Analyze {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the full report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Show the weekday × hour signal grid
    Signals {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Check that an operations file imports cleanly
    Validate {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// List strategy labels present in an operations file
    Strategies {
        #[arg(short, long)]
        input: PathBuf,
    },
}

pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Analyze {
            input,
            config,
            output,
            overrides,
        } => run_analyze(&input, config.as_ref(), output.as_ref(), &overrides),
        Command::Signals {
            input,
            config,
            overrides,
        } => run_signals(&input, config.as_ref(), &overrides),
        Command::Validate { input } => run_validate(&input),
        Command::Strategies { input } => run_strategies(&input),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, JournalError> {
    FileConfigAdapter::from_file(path).map_err(|e| JournalError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Config file (if any) → validated config → command-line overrides.
pub fn resolve_config(
    config_path: Option<&PathBuf>,
    overrides: &Overrides,
    today: NaiveDate,
) -> Result<AnalysisConfig, JournalError> {
    let adapter = match config_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            load_config(path)?
        }
        None => FileConfigAdapter::empty(),
    };
    let config = build_analysis_config(&adapter, today)?;
    apply_overrides(config, overrides)
}

pub fn apply_overrides(
    mut config: AnalysisConfig,
    overrides: &Overrides,
) -> Result<AnalysisConfig, JournalError> {
    if let Some(capital) = overrides.capital {
        if !capital.is_finite() || capital <= 0.0 {
            return Err(JournalError::InvalidArgument {
                name: "--capital".into(),
                reason: "must be positive".into(),
            });
        }
        config.initial_capital = capital;
    }
    if let Some(runs) = overrides.runs {
        if runs == 0 || runs > MAX_MONTE_CARLO_RUNS {
            return Err(JournalError::InvalidArgument {
                name: "--runs".into(),
                reason: format!("must be between 1 and {MAX_MONTE_CARLO_RUNS}"),
            });
        }
        config.monte_carlo_runs = runs;
    }
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(date) = overrides.reference_date {
        config.reference_date = date;
    }
    if let Some(strategy) = overrides.strategy.as_deref() {
        let strategy = strategy.trim();
        if !strategy.is_empty() {
            config.strategy = Some(strategy.to_string());
        }
    }
    Ok(config)
}

fn run_analyze(
    input: &Path,
    config_path: Option<&PathBuf>,
    output: Option<&PathBuf>,
    overrides: &Overrides,
) -> Result<(), JournalError> {
    let config = resolve_config(config_path, overrides, today())?;
    let port = CsvOperationAdapter::new(input.to_path_buf());
    let reporter = JsonReportAdapter::new();

    let report = run_analysis_pipeline(&port, &config, output.map(PathBuf::as_path), &reporter)?;
    print!("{}", format_report(&report));
    Ok(())
}

/// Loads records, builds the report and hands it to `reporter` when an
/// output path is given.
pub fn run_analysis_pipeline(
    port: &dyn OperationPort,
    config: &AnalysisConfig,
    output: Option<&Path>,
    reporter: &dyn ReportPort,
) -> Result<AnalysisReport, JournalError> {
    let records = port.fetch_operations()?;
    tracing::info!(
        records = records.len(),
        capital = config.initial_capital,
        runs = config.monte_carlo_runs,
        seed = ?config.seed,
        reference_date = %config.reference_date,
        "running analysis"
    );
    if records.is_empty() {
        tracing::warn!("no operations to analyze");
    }

    let mut rng = make_rng(config.seed);
    let report = AnalysisReport::build(&records, config, &mut rng)?;

    if let Some(path) = output {
        reporter.write(&report, path)?;
    }
    Ok(report)
}

fn run_signals(
    input: &Path,
    config_path: Option<&PathBuf>,
    overrides: &Overrides,
) -> Result<(), JournalError> {
    let config = resolve_config(config_path, overrides, today())?;
    let port = CsvOperationAdapter::new(input.to_path_buf());
    let grid = signals_for(&port, &config)?;
    print!("{}", format_signal_grid(&grid));
    Ok(())
}

pub fn signals_for(
    port: &dyn OperationPort,
    config: &AnalysisConfig,
) -> Result<SignalGrid, JournalError> {
    let mut records = port.fetch_operations()?;
    if let Some(label) = config.strategy.as_deref() {
        records = filter_by_strategy(&records, label);
    }
    Ok(classify_slots(&records, config.reference_date))
}

fn run_validate(input: &Path) -> Result<(), JournalError> {
    eprintln!("Validating operations: {}", input.display());
    let port = CsvOperationAdapter::new(input.to_path_buf());
    let records = port.fetch_operations()?;

    let first = records.iter().map(|r| r.date).min();
    let last = records.iter().map(|r| r.date).max();
    let strategies = crate::domain::operation::distinct_strategies(&records);

    println!("{} operations", records.len());
    if let (Some(first), Some(last)) = (first, last) {
        println!("{} to {}", first, last);
    }
    if !strategies.is_empty() {
        println!("strategies: {}", strategies.join(", "));
    }
    eprintln!("Operations file is valid.");
    Ok(())
}

fn run_strategies(input: &Path) -> Result<(), JournalError> {
    let port = CsvOperationAdapter::new(input.to_path_buf());
    let strategies = port.list_strategies()?;
    if strategies.is_empty() {
        eprintln!("No strategy labels found");
    }
    for label in &strategies {
        println!("{}", label);
    }
    Ok(())
}

fn fmt_opt(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v:.2}{suffix}"),
        None => "n/a".to_string(),
    }
}

/// Console summary of a report.
pub fn format_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let s = &report.summary;

    let _ = writeln!(out, "=== Journal ===");
    if let Some(strategy) = &report.strategy {
        let _ = writeln!(out, "Strategy:         {}", strategy);
    }
    let _ = writeln!(
        out,
        "Operations:       {} over {} days",
        s.operations, s.trading_days
    );
    let _ = writeln!(out, "Net Result:       {:.2}", s.total_result);
    let _ = writeln!(
        out,
        "Win Rate:         {}",
        fmt_opt(s.win_rate.map(|r| r * 100.0), "%")
    );
    let _ = writeln!(
        out,
        "Days +/-/0:       {}/{}/{}",
        s.winning_days, s.losing_days, s.flat_days
    );

    let c = &report.capital;
    let _ = writeln!(out, "\n=== Capital ===");
    let _ = writeln!(out, "Initial:          {:.2}", c.initial_capital);
    let _ = writeln!(out, "Final:            {:.2}", c.final_balance);
    let _ = writeln!(out, "Yield:            {:.2}%", c.yield_percent);
    let _ = writeln!(out, "Max Drawdown:     {:.2}%", c.max_drawdown_percent);
    match c.ruin_day_index {
        Some(day) => {
            let _ = writeln!(out, "Ruin:             day {}", day);
        }
        None => {
            let _ = writeln!(out, "Ruin:             none");
        }
    }

    let _ = writeln!(out, "\n=== Monte Carlo ===");
    match &report.monte_carlo {
        Some(mc) => {
            let _ = writeln!(out, "Runs:             {}", mc.runs);
            let _ = writeln!(out, "Profit Prob.:     {:.1}%", mc.profit_probability);
            let _ = writeln!(out, "Median Result:    {:.2}", mc.median_result);
            let _ = writeln!(out, "VaR 95:           {:.2}", mc.var95);
            let _ = writeln!(out, "Best 95:          {:.2}", mc.best_scenario95);
        }
        None => {
            let _ = writeln!(
                out,
                "not enough history (need at least {} trading days)",
                MIN_DAYS
            );
        }
    }

    let st = &report.streaks;
    let _ = writeln!(out, "\n=== Streaks ===");
    let _ = writeln!(out, "Max Win Streak:   {}", st.max_win_streak);
    let _ = writeln!(out, "Max Loss Streak:  {}", st.max_loss_streak);
    let _ = writeln!(
        out,
        "After Win Run:    {} ({} events)",
        fmt_opt(st.avg_after_win_streak, ""),
        st.after_win_streak_count()
    );
    let _ = writeln!(
        out,
        "After Loss Run:   {} ({} events)",
        fmt_opt(st.avg_after_loss_streak, ""),
        st.after_loss_streak_count()
    );
    let _ = writeln!(
        out,
        "Day After Loss:   {} ({} events)",
        fmt_opt(st.avg_recovery_after_loss, ""),
        st.recovery_events
    );
    let _ = writeln!(
        out,
        "Recovery Rate:    {}",
        fmt_opt(st.recovery_rate.map(|r| r * 100.0), "%")
    );

    let sig = &report.signals.summary;
    let _ = writeln!(out, "\n=== Signals ({}) ===", report.signals.reference_month);
    let _ = writeln!(
        out,
        "LIGAR {}  ALERTA {}  NAO_LIGAR {}  SEM_DADOS {}",
        sig.ligar, sig.alerta, sig.nao_ligar, sig.sem_dados
    );
    let _ = writeln!(out, "Score:            {:.1}", sig.score);

    out
}

/// Hours down, weekdays across.
pub fn format_signal_grid(grid: &SignalGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Signals for {}", grid.reference_month);
    let _ = write!(out, "{:<6}", "hour");
    for day in TRADING_WEEKDAYS {
        let _ = write!(out, "{:<11}", day.to_string());
    }
    let _ = writeln!(out);

    for hour in FIRST_SLOT_HOUR..=LAST_SLOT_HOUR {
        let _ = write!(out, "{:<6}", format!("{hour:02}h"));
        for day in TRADING_WEEKDAYS {
            let label = grid
                .cell(day, hour)
                .map(|c| c.signal.to_string())
                .unwrap_or_default();
            let _ = write!(out, "{:<11}", label);
        }
        let _ = writeln!(out);
    }

    let s = &grid.summary;
    let _ = writeln!(
        out,
        "\nLIGAR {}  ALERTA {}  NAO_LIGAR {}  SEM_DADOS {}  score {:.1}",
        s.ligar, s.alerta, s.nao_ligar, s.sem_dados, s.score
    );
    out
}
