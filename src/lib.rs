//! Consolidates per-subject glucose/insulin readings into per-patient
//! pre/post diet summaries with HOMA insulin-resistance indices.

pub mod cli;
pub mod consolidation;
pub mod models;
pub mod pipeline;
pub mod settings;
pub mod subject;
pub mod table;
mod utils;

use clap::Parser;

pub use cli::Cli;
pub use consolidation::{consolidate, ConsolidationConfig};
pub use models::{DecoratedReading, Measurement, PatientSummary, PhaseSummary, RawReading};
pub use pipeline::RunReport;
pub use settings::{MalformedIdPolicy, Settings};
pub use subject::{decode, is_included, FormatError, SubjectMetadata};

pub fn run() -> anyhow::Result<()> {
    // RUST_LOG wins over the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;

    log::info!(
        "consolidating {} into {}",
        settings.input.display(),
        settings.output.display()
    );

    let report = pipeline::execute(&settings)?;

    log::info!(
        "done: {} rows, {} malformed skipped, {} excluded, {} duplicate days, {} patients",
        report.rows_read,
        report.malformed_skipped,
        report.excluded,
        report.duplicate_days,
        report.patients
    );

    Ok(())
}
