use serde::{Deserialize, Serialize};

/// Tunables for the per-patient reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Denominator of the HOMA-IR formula (glucose in mg/dL, insulin in µU/mL).
    pub homa_divisor: f64,

    /// Log a warning when a patient has two readings for the same phase and day
    pub warn_on_duplicate_days: bool,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            homa_divisor: 405.0,
            warn_on_duplicate_days: true,
        }
    }
}
