//! The batch run: source rows → decode → filter → consolidate → sink.

use anyhow::{Context, Result};

use crate::consolidation::{consolidate_with_report, Consolidation};
use crate::models::{DecoratedReading, RawReading};
use crate::settings::{MalformedIdPolicy, Settings};
use crate::subject::{decode, retain_included};
use crate::table::{self, write_debug_dump, TableSink, TableSource};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Counts gathered over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub rows_read: usize,
    pub malformed_skipped: usize,
    pub excluded: usize,
    pub duplicate_days: usize,
    pub patients: usize,
}

/// Decodes every row's subject id. Under [`MalformedIdPolicy::Abort`] the
/// first bad id fails the run; under `Skip` it is logged and counted.
pub fn decode_readings(
    rows: Vec<RawReading>,
    policy: MalformedIdPolicy,
) -> Result<(Vec<DecoratedReading>, usize)> {
    let mut decorated = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for raw in rows {
        match decode(&raw.subject_id) {
            Ok(metadata) => decorated.push(DecoratedReading::new(raw, metadata)),
            Err(err) => match policy {
                MalformedIdPolicy::Abort => {
                    return Err(err).with_context(|| format!("row {}", raw.row));
                }
                MalformedIdPolicy::Skip => {
                    log_warn!("skipping row {}: {err}", raw.row);
                    skipped += 1;
                }
            },
        }
    }

    Ok((decorated, skipped))
}

/// Runs the in-memory part of the pipeline over already-read rows.
pub fn process(rows: Vec<RawReading>, settings: &Settings) -> Result<(Consolidation, RunReport)> {
    let rows_read = rows.len();
    let (decorated, malformed_skipped) = decode_readings(rows, settings.malformed_ids)?;

    let filtered = retain_included(decorated);
    log_info!(
        "{} readings included, {} excluded by inclusion flag",
        filtered.included.len(),
        filtered.excluded
    );

    let consolidation = consolidate_with_report(&filtered.included, &settings.consolidation);

    let report = RunReport {
        rows_read,
        malformed_skipped,
        excluded: filtered.excluded,
        duplicate_days: consolidation.duplicate_days,
        patients: consolidation.summaries.len(),
    };

    Ok((consolidation, report))
}

/// Reads from `source`, consolidates, and writes to `sink`. Nothing reaches
/// the sink unless every earlier step succeeded.
pub fn run_with(
    source: &mut dyn TableSource,
    sink: &mut dyn TableSink,
    settings: &Settings,
) -> Result<(Consolidation, RunReport)> {
    let rows = source.read_readings()?;
    let (consolidation, report) = process(rows, settings)?;
    sink.write_summaries(&consolidation.summaries)?;
    Ok((consolidation, report))
}

/// Runs the whole batch job against the files named in `settings`.
pub fn execute(settings: &Settings) -> Result<RunReport> {
    let mut source = table::open_source(&settings.input, settings.worksheet.as_deref())?;
    let rows = source
        .read_readings()
        .with_context(|| format!("Failed to read readings from {}", settings.input.display()))?;

    let (consolidation, report) = process(rows, settings)?;

    let mut sink = table::create_sink(&settings.output)?;
    sink.write_summaries(&consolidation.summaries)
        .with_context(|| format!("Failed to write summaries to {}", settings.output.display()))?;
    log_info!(
        "wrote {} patient summaries to {}",
        report.patients,
        settings.output.display()
    );

    if let Some(dump_path) = &settings.debug_dump {
        write_debug_dump(dump_path, &consolidation)?;
        log_info!("wrote debug dump to {}", dump_path.display());
    }

    Ok(report)
}
