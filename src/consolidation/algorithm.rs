use std::collections::HashMap;

use crate::consolidation::bucket::{DietPhase, PatientRecord};
use crate::consolidation::config::ConsolidationConfig;
use crate::consolidation::scoring::summarize_phase;
use crate::models::{DecoratedReading, PatientSummary};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

/// Grouped records, their summaries (same order) and how many readings
/// replaced an earlier one for the same patient, phase and day.
#[derive(Debug, Clone, PartialEq)]
pub struct Consolidation {
    pub records: Vec<PatientRecord>,
    pub summaries: Vec<PatientSummary>,
    pub duplicate_days: usize,
}

impl PatientRecord {
    pub fn summarize(&self, config: &ConsolidationConfig) -> PatientSummary {
        PatientSummary {
            patient_id: self.patient_id.clone(),
            pre: summarize_phase(&self.pre, config),
            post: summarize_phase(&self.post, config),
        }
    }
}

/// Main consolidation function: one summary per patient, in the order each
/// patient id first appears in `readings`.
pub fn consolidate(readings: &[DecoratedReading], config: &ConsolidationConfig) -> Vec<PatientSummary> {
    consolidate_with_report(readings, config).summaries
}

pub fn consolidate_with_report(
    readings: &[DecoratedReading],
    config: &ConsolidationConfig,
) -> Consolidation {
    let (records, duplicate_days) = group_by_patient(readings, config);

    let summaries = records
        .iter()
        .map(|record| record.summarize(config))
        .collect();

    Consolidation {
        records,
        summaries,
        duplicate_days,
    }
}

/// Single pass grouping by patient id, preserving first-seen order.
/// Later readings for an already-filled (phase, day) slot win.
pub fn group_by_patient(
    readings: &[DecoratedReading],
    config: &ConsolidationConfig,
) -> (Vec<PatientRecord>, usize) {
    let mut records: Vec<PatientRecord> = Vec::new();
    let mut index_of: HashMap<&str, usize> = HashMap::new();
    let mut duplicate_days = 0;

    for reading in readings {
        let index = *index_of.entry(reading.patient_id()).or_insert_with(|| {
            records.push(PatientRecord::new(reading.patient_id()));
            records.len() - 1
        });

        if records[index].add(reading).is_some() {
            duplicate_days += 1;
            if config.warn_on_duplicate_days {
                log_warn!(
                    "patient {} has more than one {}-diet reading for day {}; keeping row {} ({})",
                    reading.patient_id(),
                    DietPhase::of(reading).as_str(),
                    reading.metadata.day,
                    reading.row,
                    reading.subject_id
                );
            }
        }
    }

    log_debug!(
        "grouped {} readings into {} patients",
        readings.len(),
        records.len()
    );

    (records, duplicate_days)
}
