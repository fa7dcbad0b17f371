//! Candidate-job match scoring: skill normalization, eligibility gates,
//! weighted fit and constraint scoring, deal probability, outcome tracking
//! and calibration reporting.

pub mod calibration;
pub mod combiner;
pub mod config;
pub mod constraints;
pub mod domain;
pub mod engine;
pub mod fit;
pub mod gates;
pub mod repository;
pub mod router;
pub mod service;
pub mod skills;

#[cfg(test)]
mod tests;

pub use calibration::{CalibrationBucket, CalibrationReport};
pub use config::{ScoringConfig, ALGORITHM_VERSION};
pub use domain::{
    CandidateProfile, GateReport, GateStatus, JobSpec, MatchInput, MatchResult, MatchResultId,
    MomentumSignals, Outcome, OutcomeKind, RejectionCategory,
};
pub use engine::MatchEngine;
pub use gates::InputValidationError;
pub use repository::{MatchRepository, MemoryRepository, RepositoryError, StoredMatch};
pub use router::match_router;
pub use service::{MatchService, MatchServiceError};
pub use skills::{OfflineClassifier, SkillClassifier};
