//! Table I/O around the core: sources yield raw reading rows, sinks accept
//! patient summaries. Both sides pick xlsx or CSV from the file extension.

pub mod delimited;
pub mod dump;
pub mod workbook;

use std::path::Path;

use anyhow::{bail, Result};

use crate::models::{Measurement, PatientSummary, RawReading};

pub use delimited::{CsvSink, CsvSource};
pub use dump::write_debug_dump;
pub use workbook::{WorkbookSink, WorkbookSource, SUMMARY_SHEET};

/// Output header, in column order.
pub const SUMMARY_HEADER: [&str; 7] = [
    "patient_id",
    "average_glucose_pre",
    "average_insulin_pre",
    "homa_pre",
    "average_glucose_post",
    "average_insulin_post",
    "homa_post",
];

/// Something that yields reading rows with the header already discarded.
pub trait TableSource {
    fn read_readings(&mut self) -> Result<Vec<RawReading>>;
}

/// Something that accepts the consolidated summaries.
pub trait TableSink {
    fn write_summaries(&mut self, summaries: &[PatientSummary]) -> Result<()>;
}

/// Picks a source implementation from the file extension.
pub fn open_source(path: &Path, worksheet: Option<&str>) -> Result<Box<dyn TableSource>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::open(path)?)),
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => {
            Ok(Box::new(WorkbookSource::open(path, worksheet)?))
        }
        _ => bail!(
            "unsupported input file type for {} (expected .xlsx, .xls, .ods or .csv)",
            path.display()
        ),
    }
}

/// Picks a sink implementation from the file extension. The file is only
/// written once the summaries are handed over.
pub fn create_sink(path: &Path) -> Result<Box<dyn TableSink>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("xlsx") => Ok(Box::new(WorkbookSink::create(path))),
        Some("csv") => Ok(Box::new(CsvSink::create(path)?)),
        _ => bail!(
            "unsupported output file type for {} (expected .xlsx or .csv)",
            path.display()
        ),
    }
}

/// Builds a reading from the three cells of a row, or `None` when all of
/// them are empty.
pub(crate) fn reading_from_cells(
    row: usize,
    subject_id: String,
    glucose: Measurement,
    insulin: Measurement,
) -> Option<RawReading> {
    if subject_id.trim().is_empty() && glucose.is_blank() && insulin.is_blank() {
        return None;
    }

    Some(RawReading {
        row,
        subject_id,
        glucose,
        insulin,
    })
}

/// Formats a summary number for the output table; NaN stays `NaN`.
pub(crate) fn format_number(value: f64) -> String {
    value.to_string()
}
