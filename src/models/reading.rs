//! Reading data model.
//!
//! A reading is one spreadsheet row: a composite subject id plus the glucose
//! and insulin values measured for that subject on one experiment day.

use serde::Serialize;

use crate::subject::SubjectMetadata;

/// A single glucose or insulin cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "Option<f64>")]
pub enum Measurement {
    Value(f64),
    Blank,
}

impl Measurement {
    /// Interprets a textual cell. Whitespace-only text is blank, anything
    /// else that does not parse as a float becomes NaN.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Measurement::Blank;
        }
        Measurement::Value(trimmed.parse::<f64>().unwrap_or(f64::NAN))
    }

    /// The value if it takes part in an average: present, non-zero and not NaN.
    pub fn counted(&self) -> Option<f64> {
        match *self {
            Measurement::Value(v) if v != 0.0 && !v.is_nan() => Some(v),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Measurement::Blank)
    }
}

impl From<Measurement> for Option<f64> {
    fn from(value: Measurement) -> Self {
        match value {
            Measurement::Value(v) => Some(v),
            Measurement::Blank => None,
        }
    }
}

/// One data row as delivered by a table source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    /// 1-based row number in the source sheet (the header is row 1).
    pub row: usize,
    pub subject_id: String,
    pub glucose: Measurement,
    pub insulin: Measurement,
}

/// A reading whose subject id has been decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedReading {
    pub row: usize,
    pub subject_id: String,
    pub metadata: SubjectMetadata,
    pub glucose: Measurement,
    pub insulin: Measurement,
}

impl DecoratedReading {
    pub fn new(raw: RawReading, metadata: SubjectMetadata) -> Self {
        Self {
            row: raw.row,
            subject_id: raw.subject_id,
            metadata,
            glucose: raw.glucose,
            insulin: raw.insulin,
        }
    }

    pub fn patient_id(&self) -> &str {
        &self.metadata.patient_id
    }

    pub fn day_reading(&self) -> DayReading {
        DayReading {
            glucose: self.glucose,
            insulin: self.insulin,
        }
    }
}

/// The glucose/insulin pair stored in a phase bucket for one experiment day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayReading {
    pub glucose: Measurement,
    pub insulin: Measurement,
}
