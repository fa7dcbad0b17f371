use serde::{Deserialize, Serialize};

/// Revision of the scoring algorithm stamped onto every result so calibration
/// never mixes predictions from different formulas.
pub const ALGORITHM_VERSION: &str = "v3";

/// Relative weight of each fit sub-factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitWeights {
    pub skills: f64,
    pub experience: f64,
    pub industry: f64,
}

impl FitWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.industry
    }
}

/// Relative weight of each constraint sub-factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintWeights {
    pub salary: f64,
    pub commute: f64,
    pub start_date: f64,
}

impl ConstraintWeights {
    pub fn sum(&self) -> f64 {
        self.salary + self.commute + self.start_date
    }
}

/// All dials of the scoring algorithm as data. Weights are configuration, not
/// hard-coded per call, so a tuning pass only touches this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Fraction above the job ceiling a salary expectation may reach before
    /// the gate fails outright (0.15 = 15%).
    pub salary_tolerance: f64,
    /// One-way commute minutes before the commute gate warns.
    pub commute_soft_cap_minutes: u32,
    /// One-way commute minutes before the commute gate fails for onsite roles.
    pub commute_hard_cap_minutes: u32,
    /// Days past the target start inside which the start-date constraint
    /// decays gently.
    pub availability_warn_buffer_days: i64,
    /// Days past the target start after which the availability gate fails.
    pub availability_fail_window_days: i64,
    pub fit_weights: FitWeights,
    pub constraint_weights: ConstraintWeights,
    /// Share of the overall blend carried by the fit score; the constraint
    /// score carries the remainder.
    pub fit_blend_weight: f64,
    /// Multiplier applied to the blended score when the overall gate warns.
    pub gate_warn_multiplier: f64,
    /// Multiplier applied when the overall gate fails. Large enough that the
    /// result reads as not viable while staying a total function.
    pub gate_fail_multiplier: f64,
    /// Normalized-skill confidence below which a fuzzy/ai match counts as
    /// transferable rather than matched.
    pub transferable_confidence: u8,
    /// Sub-scores below this threshold are surfaced as risks.
    pub low_score_threshold: u8,
    /// Sub-scores at or above this threshold are surfaced as reasons.
    pub high_score_threshold: u8,
    /// Industry sub-score granted when the candidate has no overlapping
    /// industry.
    pub industry_partial_default: u8,
    pub version: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            salary_tolerance: 0.15,
            commute_soft_cap_minutes: 45,
            commute_hard_cap_minutes: 90,
            availability_warn_buffer_days: 60,
            availability_fail_window_days: 120,
            fit_weights: FitWeights {
                skills: 0.5,
                experience: 0.3,
                industry: 0.2,
            },
            constraint_weights: ConstraintWeights {
                salary: 0.4,
                commute: 0.35,
                start_date: 0.25,
            },
            fit_blend_weight: 0.55,
            gate_warn_multiplier: 0.9,
            gate_fail_multiplier: 0.35,
            transferable_confidence: 70,
            low_score_threshold: 40,
            high_score_threshold: 70,
            industry_partial_default: 40,
            version: ALGORITHM_VERSION.to_string(),
        }
    }
}
