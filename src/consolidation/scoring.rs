use crate::consolidation::bucket::PhaseBucket;
use crate::consolidation::config::ConsolidationConfig;
use crate::models::{Measurement, PhaseSummary};

/// Mean of the counted measurements. Zero counted values give NaN (0 / 0).
pub fn average<'a>(measurements: impl IntoIterator<Item = &'a Measurement>) -> f64 {
    let (total, count) = measurements
        .into_iter()
        .filter_map(Measurement::counted)
        .fold((0.0, 0usize), |(total, count), value| (total + value, count + 1));

    total / count as f64
}

/// HOMA index: glucose × insulin / divisor. NaN in either input yields NaN.
pub fn homa(average_glucose: f64, average_insulin: f64, divisor: f64) -> f64 {
    (average_glucose * average_insulin) / divisor
}

/// Reduces one phase bucket to its averages and HOMA.
pub fn summarize_phase(bucket: &PhaseBucket, config: &ConsolidationConfig) -> PhaseSummary {
    let average_glucose = average(bucket.readings().map(|reading| &reading.glucose));
    let average_insulin = average(bucket.readings().map(|reading| &reading.insulin));

    PhaseSummary {
        average_glucose,
        average_insulin,
        homa: homa(average_glucose, average_insulin, config.homa_divisor),
    }
}
