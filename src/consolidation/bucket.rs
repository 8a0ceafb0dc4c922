use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{DayReading, DecoratedReading};
use crate::subject::ExperimentDay;

/// Readings of one patient in one diet phase, keyed by experiment day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PhaseBucket {
    days: BTreeMap<ExperimentDay, DayReading>,
}

impl PhaseBucket {
    /// Stores the reading for `day`, returning the one it replaced.
    pub fn insert(&mut self, day: ExperimentDay, reading: DayReading) -> Option<DayReading> {
        self.days.insert(day, reading)
    }

    #[cfg(test)]
    pub fn get(&self, day: ExperimentDay) -> Option<&DayReading> {
        self.days.get(&day)
    }

    pub fn readings(&self) -> impl Iterator<Item = &DayReading> {
        self.days.values()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.days.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietPhase {
    Pre,
    Post,
}

impl DietPhase {
    pub fn of(reading: &DecoratedReading) -> Self {
        if reading.metadata.pre_diet.is_set() {
            DietPhase::Pre
        } else {
            DietPhase::Post
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DietPhase::Pre => "pre",
            DietPhase::Post => "post",
        }
    }
}

/// All readings of one patient, split by diet phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub patient_id: String,
    pub pre: PhaseBucket,
    pub post: PhaseBucket,
}

impl PatientRecord {
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            pre: PhaseBucket::default(),
            post: PhaseBucket::default(),
        }
    }

    pub fn bucket_mut(&mut self, phase: DietPhase) -> &mut PhaseBucket {
        match phase {
            DietPhase::Pre => &mut self.pre,
            DietPhase::Post => &mut self.post,
        }
    }

    /// Routes a reading into its phase bucket. Returns the replaced reading
    /// when the same day was already present.
    pub fn add(&mut self, reading: &DecoratedReading) -> Option<DayReading> {
        let phase = DietPhase::of(reading);
        self.bucket_mut(phase)
            .insert(reading.metadata.day, reading.day_reading())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Measurement, RawReading};
    use crate::subject::decode;

    fn reading(id: &str, glucose: f64) -> DecoratedReading {
        DecoratedReading::new(
            RawReading {
                row: 2,
                subject_id: id.to_string(),
                glucose: Measurement::Value(glucose),
                insulin: Measurement::Blank,
            },
            decode(id).unwrap(),
        )
    }

    #[test]
    fn flag_one_routes_to_pre_anything_else_to_post() {
        let mut record = PatientRecord::new("001");
        record.add(&reading("1001111", 100.0));
        record.add(&reading("1001101", 90.0));
        record.add(&reading("1001221", 80.0));
        assert_eq!(record.pre.len(), 1);
        assert_eq!(record.post.len(), 2);
    }

    #[test]
    fn duplicate_day_overwrites_and_reports() {
        let mut record = PatientRecord::new("001");
        assert!(record.add(&reading("1001111", 100.0)).is_none());
        let replaced = record.add(&reading("1001111", 140.0)).unwrap();
        assert_eq!(replaced.glucose, Measurement::Value(100.0));
        assert_eq!(
            record.pre.get(ExperimentDay('1')).unwrap().glucose,
            Measurement::Value(140.0)
        );
        assert_eq!(record.pre.len(), 1);
    }

    #[test]
    fn bucket_serializes_keyed_by_day() {
        let mut record = PatientRecord::new("001");
        record.add(&reading("1001211", 110.0));
        let json = serde_json::to_value(&record.pre).unwrap();
        assert_eq!(json["2"]["glucose"], 110.0);
        assert!(json["2"]["insulin"].is_null());
    }
}
