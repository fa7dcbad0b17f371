use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::domain::{MatchResult, MatchResultId, Outcome};

/// A persisted prediction together with the id the store assigned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMatch {
    pub id: MatchResultId,
    pub result: MatchResult,
}

/// Error enumeration for persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("an outcome is already recorded for this match result")]
    DuplicateOutcome,
    #[error("match result not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage boundary for match results and outcomes. The engine treats the
/// store as opaque; implementations must make `record_outcome` a conditional
/// insert (atomic only-if-absent), not a read-then-write.
pub trait MatchRepository: Send + Sync {
    fn insert_result(&self, result: MatchResult) -> Result<MatchResultId, RepositoryError>;
    fn fetch_result(&self, id: &MatchResultId) -> Result<Option<StoredMatch>, RepositoryError>;
    fn record_outcome(&self, outcome: Outcome) -> Result<(), RepositoryError>;
    /// All (prediction, outcome) pairs whose result carries the given
    /// algorithm version. Calibration must never mix versions.
    fn outcomes_for_version(
        &self,
        version: &str,
    ) -> Result<Vec<(StoredMatch, Outcome)>, RepositoryError>;
}

static MATCH_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_match_id() -> MatchResultId {
    let id = MATCH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    MatchResultId(format!("match-{id:06}"))
}

#[derive(Default)]
struct MemoryState {
    results: HashMap<MatchResultId, MatchResult>,
    order: Vec<MatchResultId>,
    outcomes: HashMap<MatchResultId, Outcome>,
}

/// Mutex-backed in-memory store. Backs the demo command, the HTTP state, and
/// tests; the single lock makes the outcome insert naturally conditional.
#[derive(Default, Clone)]
pub struct MemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MatchRepository for MemoryRepository {
    fn insert_result(&self, result: MatchResult) -> Result<MatchResultId, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let id = next_match_id();
        state.results.insert(id.clone(), result);
        state.order.push(id.clone());
        Ok(id)
    }

    fn fetch_result(&self, id: &MatchResultId) -> Result<Option<StoredMatch>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.results.get(id).map(|result| StoredMatch {
            id: id.clone(),
            result: result.clone(),
        }))
    }

    fn record_outcome(&self, outcome: Outcome) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        if !state.results.contains_key(&outcome.match_result_id) {
            return Err(RepositoryError::NotFound);
        }
        if state.outcomes.contains_key(&outcome.match_result_id) {
            return Err(RepositoryError::DuplicateOutcome);
        }
        state
            .outcomes
            .insert(outcome.match_result_id.clone(), outcome);
        Ok(())
    }

    fn outcomes_for_version(
        &self,
        version: &str,
    ) -> Result<Vec<(StoredMatch, Outcome)>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        let mut pairs = Vec::new();
        for id in &state.order {
            let Some(result) = state.results.get(id) else {
                continue;
            };
            if result.version != version {
                continue;
            }
            if let Some(outcome) = state.outcomes.get(id) {
                pairs.push((
                    StoredMatch {
                        id: id.clone(),
                        result: result.clone(),
                    },
                    outcome.clone(),
                ));
            }
        }
        Ok(pairs)
    }
}
