use crate::models::DecoratedReading;
use crate::subject::SubjectMetadata;

const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Included readings plus how many were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub included: Vec<DecoratedReading>,
    pub excluded: usize,
}

/// A subject is part of the study iff its inclusion flag is the character `'1'`.
pub fn is_included(metadata: &SubjectMetadata) -> bool {
    metadata.inclusion.is_set()
}

/// Drops excluded readings, keeping input order.
pub fn retain_included(readings: Vec<DecoratedReading>) -> FilterOutcome {
    let total = readings.len();
    let included: Vec<DecoratedReading> = readings
        .into_iter()
        .filter(|reading| {
            let keep = is_included(&reading.metadata);
            if !keep {
                log_debug!(
                    "excluding row {} (subject {}, inclusion flag {})",
                    reading.row,
                    reading.subject_id,
                    reading.metadata.inclusion
                );
            }
            keep
        })
        .collect();

    FilterOutcome {
        excluded: total - included.len(),
        included,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Measurement, RawReading};
    use crate::subject::{decode, FlagDigit};

    fn reading(row: usize, id: &str) -> DecoratedReading {
        let raw = RawReading {
            row,
            subject_id: id.to_string(),
            glucose: Measurement::Value(100.0),
            insulin: Measurement::Value(5.0),
        };
        DecoratedReading::new(raw, decode(id).unwrap())
    }

    #[test]
    fn only_character_one_is_included() {
        let mut meta = decode("1001111").unwrap();
        assert!(is_included(&meta));
        for other in ['0', '2', '9'] {
            meta.inclusion = FlagDigit(other);
            assert!(!is_included(&meta));
        }
    }

    #[test]
    fn keeps_order_and_counts_exclusions() {
        let outcome = retain_included(vec![
            reading(2, "1001111"),
            reading(3, "1002110"),
            reading(4, "1001211"),
            reading(5, "1003112"),
        ]);
        let rows: Vec<usize> = outcome.included.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![2, 4]);
        assert_eq!(outcome.excluded, 2);
    }
}
