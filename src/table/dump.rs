//! Optional JSON dump of the consolidated structure, for inspecting what
//! each summary was computed from.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::consolidation::{Consolidation, PhaseBucket};
use crate::models::PhaseSummary;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DebugDump<'a> {
    generated_at: DateTime<Utc>,
    duplicate_days: usize,
    patients: Vec<PatientDump<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PatientDump<'a> {
    patient_id: &'a str,
    pre_diet: PhaseDump<'a>,
    post_diet: PhaseDump<'a>,
}

/// Per-day readings flattened next to the phase averages.
#[derive(Debug, Serialize)]
struct PhaseDump<'a> {
    #[serde(flatten)]
    readings: &'a PhaseBucket,
    #[serde(flatten)]
    summary: &'a PhaseSummary,
}

fn to_json(consolidation: &Consolidation, generated_at: DateTime<Utc>) -> Result<String> {
    let patients = consolidation
        .records
        .iter()
        .zip(&consolidation.summaries)
        .map(|(record, summary)| PatientDump {
            patient_id: &record.patient_id,
            pre_diet: PhaseDump {
                readings: &record.pre,
                summary: &summary.pre,
            },
            post_diet: PhaseDump {
                readings: &record.post,
                summary: &summary.post,
            },
        })
        .collect();

    let dump = DebugDump {
        generated_at,
        duplicate_days: consolidation.duplicate_days,
        patients,
    };

    Ok(serde_json::to_string_pretty(&dump)?)
}

pub fn write_debug_dump(path: &Path, consolidation: &Consolidation) -> Result<()> {
    let serialized = to_json(consolidation, Utc::now())?;
    fs::write(path, serialized)
        .with_context(|| format!("Failed to write debug dump to {}", path.display()))
}
