use serde::{Deserialize, Serialize};

use super::domain::{Outcome, OutcomeKind};
use super::repository::StoredMatch;

const BUCKET_COUNT: usize = 10;

/// One decile of the reliability curve: how often matches predicted in this
/// probability band actually converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBucket {
    /// Inclusive lower bound of the predicted-probability band.
    pub lower: u8,
    /// Exclusive upper bound (inclusive for the top band).
    pub upper: u8,
    pub matches: usize,
    pub hired: usize,
    /// Mean predicted deal probability inside the band, percent.
    pub predicted: f64,
    /// Realized hire rate inside the band, percent.
    pub observed: f64,
}

/// Bucketed reliability table for one scoring-algorithm version. Advisory
/// only: a human tunes weights against it; nothing here adjusts weights
/// automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub version: String,
    pub total_matches: usize,
    pub total_hired: usize,
    pub buckets: Vec<CalibrationBucket>,
}

/// Aggregate (prediction, outcome) pairs into decile buckets of predicted
/// deal probability versus observed hire rate.
pub fn build_report(version: &str, pairs: &[(StoredMatch, Outcome)]) -> CalibrationReport {
    let mut sums = [0u64; BUCKET_COUNT];
    let mut counts = [0usize; BUCKET_COUNT];
    let mut hires = [0usize; BUCKET_COUNT];

    for (stored, outcome) in pairs {
        let predicted = stored.result.deal_probability;
        let bucket = bucket_index(predicted);
        sums[bucket] += u64::from(predicted);
        counts[bucket] += 1;
        if outcome.outcome == OutcomeKind::Hired {
            hires[bucket] += 1;
        }
    }

    let buckets = (0..BUCKET_COUNT)
        .map(|index| {
            let count = counts[index];
            let (predicted, observed) = if count == 0 {
                (0.0, 0.0)
            } else {
                (
                    sums[index] as f64 / count as f64,
                    hires[index] as f64 * 100.0 / count as f64,
                )
            };
            CalibrationBucket {
                lower: (index * 10) as u8,
                upper: ((index + 1) * 10) as u8,
                matches: count,
                hired: hires[index],
                predicted,
                observed,
            }
        })
        .collect();

    CalibrationReport {
        version: version.to_string(),
        total_matches: pairs.len(),
        total_hired: pairs
            .iter()
            .filter(|(_, outcome)| outcome.outcome == OutcomeKind::Hired)
            .count(),
        buckets,
    }
}

fn bucket_index(probability: u8) -> usize {
    usize::from(probability.min(99)) / 10
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::domain::OutcomeKind;
    use crate::matching::tests::fixtures::{outcome_for, sample_result};
    use crate::matching::repository::StoredMatch;
    use crate::matching::domain::MatchResultId;

    fn pair(id: &str, deal_probability: u8, outcome: OutcomeKind) -> (StoredMatch, Outcome) {
        let mut result = sample_result();
        result.deal_probability = deal_probability;
        let id = MatchResultId(id.to_string());
        (
            StoredMatch {
                id: id.clone(),
                result,
            },
            outcome_for(&id, outcome),
        )
    }

    #[test]
    fn observed_rate_tracks_predictions_per_bucket() {
        // Twenty matches predicted around 70%; fourteen hired. The 70-80
        // decile should report predicted ~70 and observed 70 as a pair.
        let mut pairs = Vec::new();
        for index in 0..20 {
            let outcome = if index < 14 {
                OutcomeKind::Hired
            } else {
                OutcomeKind::Rejected
            };
            pairs.push(pair(&format!("match-{index}"), 70, outcome));
        }

        let report = build_report("v3", &pairs);
        assert_eq!(report.total_matches, 20);
        assert_eq!(report.total_hired, 14);

        let bucket = &report.buckets[7];
        assert_eq!(bucket.lower, 70);
        assert_eq!(bucket.matches, 20);
        assert_eq!(bucket.hired, 14);
        assert!((bucket.predicted - 70.0).abs() < 1e-9);
        assert!((bucket.observed - 70.0).abs() < 1e-9);
    }

    #[test]
    fn empty_buckets_report_zeroes() {
        let report = build_report("v3", &[]);
        assert_eq!(report.buckets.len(), 10);
        assert!(report.buckets.iter().all(|bucket| bucket.matches == 0));
        assert_eq!(report.total_matches, 0);
    }

    #[test]
    fn top_band_is_inclusive_of_one_hundred() {
        let pairs = vec![pair("match-top", 100, OutcomeKind::Hired)];
        let report = build_report("v3", &pairs);
        assert_eq!(report.buckets[9].matches, 1);
        assert_eq!(report.buckets[9].hired, 1);
    }

    #[test]
    fn non_hire_outcomes_lower_the_observed_rate_only() {
        let pairs = vec![
            pair("match-a", 85, OutcomeKind::Hired),
            pair("match-b", 85, OutcomeKind::Withdrew),
            pair("match-c", 85, OutcomeKind::Expired),
            pair("match-d", 85, OutcomeKind::Rejected),
        ];

        let report = build_report("v3", &pairs);
        let bucket = &report.buckets[8];
        assert_eq!(bucket.matches, 4);
        assert!((bucket.observed - 25.0).abs() < 1e-9);
        assert!((bucket.predicted - 85.0).abs() < 1e-9);
    }
}
