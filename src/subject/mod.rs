//! Subject identifiers: decoding the composite id and deciding inclusion.

pub mod filter;
pub mod identifier;

pub use filter::{is_included, retain_included, FilterOutcome};
pub use identifier::{decode, ExperimentDay, FlagDigit, FormatError, SubjectMetadata};
