use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::Workbook;

use crate::models::{Measurement, PatientSummary, RawReading};
use crate::table::{format_number, reading_from_cells, TableSink, TableSource, SUMMARY_HEADER};

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Column positions of the three meaningful fields (0-based, absolute).
const SUBJECT_ID_COLUMN: u32 = 0;
const GLUCOSE_COLUMN: u32 = 1;
const INSULIN_COLUMN: u32 = 2;

/// Name of the worksheet the summary table is written to.
pub const SUMMARY_SHEET: &str = "Consolidated Data";

/// Reads readings from one worksheet of a spreadsheet workbook.
pub struct WorkbookSource {
    path: PathBuf,
    range: Range<Data>,
}

impl WorkbookSource {
    /// Opens `path` and loads either the named worksheet or the first one.
    pub fn open(path: &Path, worksheet: Option<&str>) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open workbook {}", path.display()))?;

        let range = match worksheet {
            Some(name) => workbook
                .worksheet_range(name)
                .with_context(|| format!("Failed to read worksheet '{name}' of {}", path.display()))?,
            None => workbook
                .worksheet_range_at(0)
                .ok_or_else(|| anyhow!("workbook {} has no worksheets", path.display()))?
                .with_context(|| format!("Failed to read first worksheet of {}", path.display()))?,
        };

        Ok(Self {
            path: path.to_path_buf(),
            range,
        })
    }

    /// Wraps an already loaded range.
    pub fn from_range(range: Range<Data>) -> Self {
        Self {
            path: PathBuf::new(),
            range,
        }
    }

    fn cell(&self, row: u32, column: u32) -> Option<&Data> {
        self.range.get_value((row, column))
    }
}

impl TableSource for WorkbookSource {
    fn read_readings(&mut self) -> Result<Vec<RawReading>> {
        let (Some(start), Some(end)) = (self.range.start(), self.range.end()) else {
            return Ok(Vec::new());
        };

        // Sheet row 1 (index 0) is the header.
        let first_data_row = start.0.max(1);
        let mut readings = Vec::new();

        for row in first_data_row..=end.0 {
            let subject_id = self.cell(row, SUBJECT_ID_COLUMN).map(cell_text).unwrap_or_default();
            let glucose = cell_measurement(self.cell(row, GLUCOSE_COLUMN));
            let insulin = cell_measurement(self.cell(row, INSULIN_COLUMN));

            if let Some(reading) = reading_from_cells(row as usize + 1, subject_id, glucose, insulin) {
                readings.push(reading);
            }
        }

        log_info!(
            "read {} rows from {}",
            readings.len(),
            self.path.display()
        );
        Ok(readings)
    }
}

/// Renders a cell as text. Whole floats print without a fraction, so a
/// numeric id cell `1001111.0` becomes `1001111`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => value.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_measurement(cell: Option<&Data>) -> Measurement {
    match cell {
        None | Some(Data::Empty) => Measurement::Blank,
        Some(Data::Int(value)) => Measurement::Value(*value as f64),
        Some(Data::Float(value)) => Measurement::Value(*value),
        Some(Data::String(text)) => Measurement::from_text(text),
        Some(other) => Measurement::from_text(&other.to_string()),
    }
}

/// Writes the summary table as an xlsx workbook with a single
/// `Consolidated Data` sheet. Numbers are numeric cells; NaN has no Excel
/// number form and is written as the text `NaN`.
pub struct WorkbookSink {
    path: PathBuf,
}

impl WorkbookSink {
    /// Nothing touches the file system until the summaries are written.
    pub fn create(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl TableSink for WorkbookSink {
    fn write_summaries(&mut self, summaries: &[PatientSummary]) -> Result<()> {
        let mut workbook = Workbook::new();

        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(SUMMARY_SHEET)?;

            for (column, label) in SUMMARY_HEADER.iter().enumerate() {
                worksheet.write_string(0, column as u16, *label)?;
            }

            for (index, summary) in summaries.iter().enumerate() {
                let row = index as u32 + 1;
                // Text keeps the leading zeros of the patient id.
                worksheet.write_string(row, 0, summary.patient_id.as_str())?;

                for (offset, value) in summary.columns().into_iter().enumerate() {
                    let column = offset as u16 + 1;
                    if value.is_nan() {
                        worksheet.write_string(row, column, format_number(value))?;
                    } else {
                        worksheet.write_number(row, column, value)?;
                    }
                }
            }
        }

        workbook
            .save(&self.path)
            .with_context(|| format!("Failed to save workbook {}", self.path.display()))?;

        log_info!(
            "wrote {} rows to sheet '{}' of {}",
            summaries.len(),
            SUMMARY_SHEET,
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[[Data; 3]]) -> Range<Data> {
        let mut range = Range::new((0, 0), (rows.len() as u32 - 1, 2));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn header() -> [Data; 3] {
        [
            Data::String("subject_id".into()),
            Data::String("glucose".into()),
            Data::String("insulin".into()),
        ]
    }

    #[test]
    fn skips_header_and_converts_cells() {
        let mut source = WorkbookSource::from_range(sheet(&[
            header(),
            [Data::Float(1001111.0), Data::Int(100), Data::String("5".into())],
            [Data::String("1001211".into()), Data::Float(110.5), Data::Empty],
        ]));

        let readings = source.read_readings().unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].row, 2);
        assert_eq!(readings[0].subject_id, "1001111");
        assert_eq!(readings[0].glucose, Measurement::Value(100.0));
        assert_eq!(readings[0].insulin, Measurement::Value(5.0));
        assert_eq!(readings[1].row, 3);
        assert_eq!(readings[1].glucose, Measurement::Value(110.5));
        assert!(readings[1].insulin.is_blank());
    }

    #[test]
    fn empty_rows_are_ignored() {
        let mut source = WorkbookSource::from_range(sheet(&[
            header(),
            [Data::Empty, Data::Empty, Data::Empty],
            [Data::Int(1002111), Data::String(" ".into()), Data::Int(4)],
        ]));

        let readings = source.read_readings().unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].row, 3);
        assert!(readings[0].glucose.is_blank());
    }

    #[test]
    fn header_only_sheet_has_no_readings() {
        let mut source = WorkbookSource::from_range(sheet(&[header()]));
        assert!(source.read_readings().unwrap().is_empty());
    }

    fn summary(patient_id: &str, pre: [f64; 3], post: [f64; 3]) -> PatientSummary {
        use crate::models::PhaseSummary;
        PatientSummary {
            patient_id: patient_id.into(),
            pre: PhaseSummary {
                average_glucose: pre[0],
                average_insulin: pre[1],
                homa: pre[2],
            },
            post: PhaseSummary {
                average_glucose: post[0],
                average_insulin: post[1],
                homa: post[2],
            },
        }
    }

    #[test]
    fn written_workbook_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("consolidated-data.xlsx");
        let summaries = vec![
            summary("001", [105.0, 6.0, 105.0 * 6.0 / 405.0], [92.5, 7.0, 92.5 * 7.0 / 405.0]),
            summary("002", [f64::NAN, 4.0, f64::NAN], [90.0, 9.0, 2.0]),
        ];

        WorkbookSink::create(&path).write_summaries(&summaries).unwrap();

        let mut source = WorkbookSource::open(&path, Some(SUMMARY_SHEET)).unwrap();
        let readings = source.read_readings().unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].row, 2);
        assert_eq!(readings[0].subject_id, "001");
        assert_eq!(readings[0].glucose, Measurement::Value(105.0));
        assert_eq!(readings[0].insulin, Measurement::Value(6.0));
        assert_eq!(readings[1].subject_id, "002");
        match readings[1].glucose {
            Measurement::Value(v) => assert!(v.is_nan()),
            Measurement::Blank => panic!("NaN cell read back as blank"),
        }

        // The first sheet is the summary sheet.
        let first_sheet: Vec<String> = WorkbookSource::open(&path, None)
            .unwrap()
            .read_readings()
            .unwrap()
            .into_iter()
            .map(|reading| reading.subject_id)
            .collect();
        assert_eq!(first_sheet, vec!["001", "002"]);
    }

    #[test]
    fn written_workbook_has_header_and_numeric_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        WorkbookSink::create(&path)
            .write_summaries(&[summary("004", [90.0, 9.0, 2.0], [f64::NAN, f64::NAN, f64::NAN])])
            .unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SUMMARY_SHEET.to_string()]);
        let range = workbook.worksheet_range(SUMMARY_SHEET).unwrap();

        for (column, label) in SUMMARY_HEADER.iter().enumerate() {
            assert_eq!(
                range.get_value((0, column as u32)),
                Some(&Data::String(label.to_string()))
            );
        }
        assert_eq!(range.get_value((1, 0)), Some(&Data::String("004".into())));
        assert_eq!(range.get_value((1, 3)), Some(&Data::Float(2.0)));
        assert_eq!(range.get_value((1, 4)), Some(&Data::String("NaN".into())));
        assert_eq!(range.get_value((1, 6)), Some(&Data::String("NaN".into())));
    }

    #[test]
    fn missing_workbook_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = WorkbookSource::open(&dir.path().join("absent.xlsx"), None).err().unwrap();
        assert!(err.to_string().contains("absent.xlsx"));
    }
}
