//! Per-patient consolidation of decoded readings into pre/post diet summaries.

pub mod algorithm;
pub mod bucket;
pub mod config;
pub mod scoring;

pub use algorithm::{consolidate, consolidate_with_report, group_by_patient, Consolidation};
pub use bucket::{DietPhase, PatientRecord, PhaseBucket};
pub use config::ConsolidationConfig;
pub use scoring::{average, homa, summarize_phase};
