use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::calibration::{build_report, CalibrationReport};
use super::domain::{
    MatchInput, MatchResultId, MomentumSignals, Outcome, OutcomeKind, RejectionCategory,
};
use super::engine::MatchEngine;
use super::gates::InputValidationError;
use super::repository::{MatchRepository, RepositoryError, StoredMatch};

/// Service composing the scoring engine and the persistence boundary: the
/// `evaluate` / `record_outcome` / `calibration_report` surface exposed to
/// callers.
pub struct MatchService<R> {
    engine: Arc<MatchEngine>,
    repository: Arc<R>,
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error(transparent)]
    Validation(#[from] InputValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl<R> MatchService<R>
where
    R: MatchRepository + 'static,
{
    pub fn new(engine: MatchEngine, repository: Arc<R>) -> Self {
        Self {
            engine: Arc::new(engine),
            repository,
        }
    }

    /// Score one snapshot and persist the fresh result. The computation is
    /// never re-run when a failed save is retried by the caller; re-submitting
    /// the same snapshot simply creates a new versioned result.
    pub fn evaluate(&self, input: &MatchInput) -> Result<StoredMatch, MatchServiceError> {
        self.evaluate_with_momentum(input, None)
    }

    pub fn evaluate_with_momentum(
        &self,
        input: &MatchInput,
        momentum: Option<&MomentumSignals>,
    ) -> Result<StoredMatch, MatchServiceError> {
        let result = self.engine.evaluate_with_momentum(input, momentum)?;
        let id = self.repository.insert_result(result.clone())?;

        info!(
            id = %id.0,
            version = %result.version,
            overall = result.overall_match,
            deal = result.deal_probability,
            gate = result.gates.overall().label(),
            "match evaluated"
        );

        Ok(StoredMatch { id, result })
    }

    pub fn get(&self, id: &MatchResultId) -> Result<StoredMatch, MatchServiceError> {
        let stored = self
            .repository
            .fetch_result(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(stored)
    }

    /// Append the terminal outcome for a match. The store enforces at most
    /// one outcome per result; a duplicate surfaces as an error and leaves
    /// the existing record untouched.
    pub fn record_outcome(
        &self,
        id: &MatchResultId,
        outcome: OutcomeKind,
        stage: impl Into<String>,
        rejection_category: Option<RejectionCategory>,
    ) -> Result<Outcome, MatchServiceError> {
        let record = Outcome {
            match_result_id: id.clone(),
            outcome,
            stage: stage.into(),
            rejection_category,
            recorded_at: Utc::now(),
        };

        match self.repository.record_outcome(record.clone()) {
            Ok(()) => {
                info!(id = %id.0, outcome = outcome.label(), "outcome recorded");
                Ok(record)
            }
            Err(err) => {
                warn!(id = %id.0, error = %err, "outcome not recorded");
                Err(err.into())
            }
        }
    }

    /// Read-only reliability aggregation for one algorithm version. Safe to
    /// run on a schedule or on demand without coordinating with the scoring
    /// path.
    pub fn calibration_report(&self, version: &str) -> Result<CalibrationReport, MatchServiceError> {
        let pairs = self.repository.outcomes_for_version(version)?;
        Ok(build_report(version, &pairs))
    }
}
