use serde::Serialize;

/// Averages and HOMA index for one diet phase. NaN marks an undefined value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSummary {
    pub average_glucose: f64,
    pub average_insulin: f64,
    #[serde(rename = "HOMA")]
    pub homa: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub patient_id: String,
    pub pre: PhaseSummary,
    pub post: PhaseSummary,
}

impl PatientSummary {
    /// The six summary numbers in output column order.
    pub fn columns(&self) -> [f64; 6] {
        [
            self.pre.average_glucose,
            self.pre.average_insulin,
            self.pre.homa,
            self.post.average_glucose,
            self.post.average_insulin,
            self.post.homa,
        ]
    }
}
