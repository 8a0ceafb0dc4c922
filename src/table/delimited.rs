use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{Measurement, PatientSummary, RawReading};
use crate::table::{format_number, reading_from_cells, TableSink, TableSource, SUMMARY_HEADER};

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Reads readings from a comma separated file whose first line is a header.
pub struct CsvSource<R> {
    reader: csv::Reader<R>,
}

impl CsvSource<File> {
    pub fn open(path: &Path) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV input {}", path.display()))?;
        Ok(Self { reader })
    }
}

impl<R: std::io::Read> CsvSource<R> {
    pub fn from_reader(input: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);
        Self { reader }
    }
}

impl<R: std::io::Read> TableSource for CsvSource<R> {
    fn read_readings(&mut self) -> Result<Vec<RawReading>> {
        let mut readings = Vec::new();

        for (index, record) in self.reader.records().enumerate() {
            let record = record.context("Failed to parse CSV row")?;
            // Prefer the parser's line number; data starts on line 2.
            let row = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(index + 2);

            let field = |column: usize| record.get(column).unwrap_or("");
            let subject_id = field(0).to_string();
            let glucose = Measurement::from_text(field(1));
            let insulin = Measurement::from_text(field(2));

            if let Some(reading) = reading_from_cells(row, subject_id, glucose, insulin) {
                readings.push(reading);
            }
        }

        log_info!("read {} rows from CSV input", readings.len());
        Ok(readings)
    }
}

/// Writes the summary table as CSV.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    pub fn create(path: &Path) -> Result<Self> {
        let writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create output {}", path.display()))?;
        Ok(Self { writer })
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(output: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(output),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| anyhow::anyhow!("Failed to flush CSV output: {}", err.error()))
    }
}

impl<W: Write> TableSink for CsvSink<W> {
    fn write_summaries(&mut self, summaries: &[PatientSummary]) -> Result<()> {
        self.writer.write_record(SUMMARY_HEADER)?;

        for summary in summaries {
            let mut record = Vec::with_capacity(SUMMARY_HEADER.len());
            record.push(summary.patient_id.clone());
            record.extend(summary.columns().into_iter().map(format_number));
            self.writer.write_record(&record)?;
        }

        self.writer.flush().context("Failed to flush CSV output")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PhaseSummary;

    #[test]
    fn reads_text_cells_and_discards_header() {
        let input = "subject_id,glucose,insulin\n1001111,100,5\n1001211, ,7.5\n,,\n1001121,90\n";
        let readings = CsvSource::from_reader(input.as_bytes()).read_readings().unwrap();

        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].subject_id, "1001111");
        assert_eq!(readings[0].row, 2);
        assert!(readings[1].glucose.is_blank());
        assert_eq!(readings[1].insulin, Measurement::Value(7.5));
        assert_eq!(readings[2].row, 5);
        assert!(readings[2].insulin.is_blank());
    }

    #[test]
    fn writes_header_and_nan_columns() {
        let summaries = vec![PatientSummary {
            patient_id: "001".into(),
            pre: PhaseSummary {
                average_glucose: 90.0,
                average_insulin: 9.0,
                homa: 2.0,
            },
            post: PhaseSummary {
                average_glucose: f64::NAN,
                average_insulin: 7.0,
                homa: f64::NAN,
            },
        }];

        let mut sink = CsvSink::from_writer(Vec::new());
        sink.write_summaries(&summaries).unwrap();
        let written = String::from_utf8(sink.into_inner().unwrap()).unwrap();

        assert_eq!(
            written,
            "patient_id,average_glucose_pre,average_insulin_pre,homa_pre,\
             average_glucose_post,average_insulin_post,homa_post\n\
             001,90,9,2,NaN,7,NaN\n"
        );
    }
}
