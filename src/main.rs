//! Tender command line front-end

use std::{io, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tender::{
    batch::{BatchDriver, BatchError},
    config::{DEFAULT_POINTS_METHOD_ID, EngineConfig},
    loader::{self, LoaderError},
    report::{ReportError, SpendingReport},
};

/// Report output format
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One `ID: amount` line per payment method
    Plain,

    /// Table with limits and remaining balances
    Table,

    /// JSON array
    Json,
}

/// Allocate orders across payment methods and report the amount spent from each
#[derive(Debug, Parser)]
#[command(name = "tender", version, long_about = None)]
struct Cli {
    /// Orders file (JSON, or YAML with a `.yml`/`.yaml` extension)
    orders: PathBuf,

    /// Payment methods file (JSON, or YAML with a `.yml`/`.yaml` extension)
    payment_methods: PathBuf,

    /// Report output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Identifier of the loyalty points payment method
    #[arg(long, env = "TENDER_POINTS_METHOD", default_value = DEFAULT_POINTS_METHOD_ID)]
    points_method: String,

    /// Discount granted by a partial points payment
    #[arg(long, env = "TENDER_PARTIAL_POINTS_DISCOUNT", default_value = "0.10")]
    partial_points_discount: Decimal,

    /// Minimum points balance, relative to the order value, for a partial points payment
    #[arg(long, env = "TENDER_PARTIAL_POINTS_THRESHOLD", default_value = "0.10")]
    partial_points_threshold: Decimal,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            points_method_id: self.points_method.clone(),
            partial_points_discount: self.partial_points_discount,
            partial_points_threshold: self.partial_points_threshold,
            ..EngineConfig::default()
        }
    }
}

/// Errors that end a run
#[derive(Debug, Error)]
enum CliError {
    /// Input could not be loaded
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// Allocation failed
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// Report could not be written
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let orders = loader::load_orders(&cli.orders)?;
    let methods = loader::load_payment_methods(&cli.payment_methods)?;

    info!(
        orders = %cli.orders.display(),
        payment_methods = %cli.payment_methods.display(),
        "loaded input"
    );

    let report = BatchDriver::new(cli.engine_config()).run(&orders, methods)?;

    write_report(&report, cli.format)
}

fn write_report(report: &SpendingReport, format: OutputFormat) -> Result<(), CliError> {
    let mut out = io::stdout().lock();

    match format {
        OutputFormat::Plain => report.write_plain(&mut out)?,
        OutputFormat::Table => report.write_table(&mut out)?,
        OutputFormat::Json => report.write_json(&mut out)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            _ = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            #[expect(
                clippy::print_stderr,
                reason = "errors are reported on stderr so stdout only carries the report"
            )]
            {
                eprintln!("Error: {err}");
            }

            ExitCode::FAILURE
        }
    }
}
