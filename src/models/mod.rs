pub mod reading;
pub mod summary;

pub use reading::{DayReading, DecoratedReading, Measurement, RawReading};
pub use summary::{PatientSummary, PhaseSummary};
