use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    CandidateProfile, JobSpec, MatchInput, MatchResultId, MomentumSignals, OutcomeKind,
    RejectionCategory,
};
use super::repository::{MatchRepository, RepositoryError};
use super::service::{MatchService, MatchServiceError};

/// Router builder exposing the evaluate / outcome / calibration endpoints.
pub fn match_router<R>(service: Arc<MatchService<R>>) -> Router
where
    R: MatchRepository + 'static,
{
    Router::new()
        .route("/api/v1/matches", post(evaluate_handler::<R>))
        .route("/api/v1/matches/:match_id", get(get_handler::<R>))
        .route(
            "/api/v1/matches/:match_id/outcomes",
            post(outcome_handler::<R>),
        )
        .route(
            "/api/v1/calibration/:version",
            get(calibration_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    pub candidate: CandidateProfile,
    pub job: JobSpec,
    #[serde(default)]
    pub momentum: Option<MomentumSignals>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OutcomeRequest {
    pub outcome: OutcomeKind,
    pub stage: String,
    #[serde(default)]
    pub rejection_category: Option<RejectionCategory>,
}

fn error_response(error: MatchServiceError) -> Response {
    let status = match &error {
        MatchServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MatchServiceError::Repository(RepositoryError::DuplicateOutcome) => StatusCode::CONFLICT,
        MatchServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        MatchServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    R: MatchRepository + 'static,
{
    let input = MatchInput {
        candidate: request.candidate,
        job: request.job,
    };

    match service.evaluate_with_momentum(&input, request.momentum.as_ref()) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    Path(match_id): Path<String>,
) -> Response
where
    R: MatchRepository + 'static,
{
    match service.get(&MatchResultId(match_id)) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn outcome_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    Path(match_id): Path<String>,
    axum::Json(request): axum::Json<OutcomeRequest>,
) -> Response
where
    R: MatchRepository + 'static,
{
    let id = MatchResultId(match_id);
    match service.record_outcome(&id, request.outcome, request.stage, request.rejection_category) {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn calibration_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    Path(version): Path<String>,
) -> Response
where
    R: MatchRepository + 'static,
{
    match service.calibration_report(&version) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}
