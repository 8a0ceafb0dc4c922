//! Composite subject identifier decoding.
//!
//! A subject id packs four fields into seven digits: `1PPPDFI` where `PPP`
//! is the patient id, `D` the experiment day, `F` the pre-diet flag and `I`
//! the inclusion flag.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static SUBJECT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1([0-9]{3})([0-9])([0-9])([0-9])$").expect("valid subject id regex"));

/// The subject id does not follow the `1PPPDFI` layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("subject id '{subject_id}' does not match the 1PPPDFI pattern")]
pub struct FormatError {
    pub subject_id: String,
}

/// A single flag digit, compared as a character rather than a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagDigit(pub char);

impl FlagDigit {
    /// True iff the digit is the character `'1'`.
    pub fn is_set(&self) -> bool {
        self.0 == '1'
    }
}

impl fmt::Display for FlagDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The experiment-day digit; identifies which chronological reading this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ExperimentDay(pub char);

impl fmt::Display for ExperimentDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectMetadata {
    pub patient_id: String,
    pub day: ExperimentDay,
    pub pre_diet: FlagDigit,
    pub inclusion: FlagDigit,
}

/// Decodes a composite subject id. Surrounding whitespace is ignored.
pub fn decode(subject_id: &str) -> Result<SubjectMetadata, FormatError> {
    let format_error = || FormatError {
        subject_id: subject_id.to_string(),
    };

    let captures = SUBJECT_ID_PATTERN
        .captures(subject_id.trim())
        .ok_or_else(format_error)?;

    // Groups 2..=4 are single ASCII digits by construction.
    let digit = |index: usize| {
        captures
            .get(index)
            .and_then(|m| m.as_str().chars().next())
            .ok_or_else(format_error)
    };

    Ok(SubjectMetadata {
        patient_id: captures[1].to_string(),
        day: ExperimentDay(digit(2)?),
        pre_diet: FlagDigit(digit(3)?),
        inclusion: FlagDigit(digit(4)?),
    })
}

impl FromStr for SubjectMetadata {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}
