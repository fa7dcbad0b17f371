use chrono::{NaiveDate, TimeZone, Utc};

use crate::matching::config::ScoringConfig;
use crate::matching::domain::{
    CandidateProfile, ConstraintFactors, CommuteConstraint, ExperienceFitBreakdown,
    ExperienceLevel, FitFactors, GateCheck, GateReport, GateStatus, IndustryFitBreakdown, JobSpec,
    MatchInput, MatchResult, MatchResultId, Outcome, OutcomeKind, RemotePolicy, SalaryConstraint,
    SkillFitBreakdown, StartDateConstraint,
};
use crate::matching::engine::MatchEngine;
use crate::matching::repository::{MatchRepository, RepositoryError, StoredMatch};

pub(crate) fn base_candidate() -> CandidateProfile {
    CandidateProfile {
        skills: vec![
            "TypeScript".to_string(),
            "React".to_string(),
            "node.js".to_string(),
        ],
        experience_years: 7.0,
        industries: vec!["fintech".to_string()],
        expected_salary: 60_000,
        salary_negotiable: false,
        commute_minutes: Some(30),
        commute_confirmed: true,
        has_work_authorization: true,
        earliest_start: NaiveDate::from_ymd_opt(2026, 9, 14).expect("valid date"),
    }
}

pub(crate) fn base_job() -> JobSpec {
    JobSpec {
        required_skills: vec!["typescript".to_string(), "react".to_string()],
        nice_to_have_skills: vec!["graphql".to_string()],
        experience_level: ExperienceLevel::Senior,
        industry: None,
        salary_ceiling: 65_000,
        remote_policy: RemotePolicy::Hybrid,
        target_start: NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date"),
        requires_work_authorization: true,
        sponsorship_available: false,
    }
}

pub(crate) fn onsite_job() -> JobSpec {
    JobSpec {
        remote_policy: RemotePolicy::Onsite,
        ..base_job()
    }
}

pub(crate) fn base_input() -> MatchInput {
    MatchInput {
        candidate: base_candidate(),
        job: base_job(),
    }
}

pub(crate) fn sample_result() -> MatchResult {
    MatchEngine::new(ScoringConfig::default())
        .evaluate(&base_input())
        .expect("fixture input is valid")
}

pub(crate) fn outcome_for(id: &MatchResultId, outcome: OutcomeKind) -> Outcome {
    Outcome {
        match_result_id: id.clone(),
        outcome,
        stage: "onsite interview".to_string(),
        rejection_category: None,
        recorded_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
    }
}

fn pass_check() -> GateCheck {
    GateCheck {
        status: GateStatus::Pass,
        detail: "ok".to_string(),
    }
}

pub(crate) fn gate_report_all_pass() -> GateReport {
    GateReport {
        salary: pass_check(),
        commute: pass_check(),
        work_auth: pass_check(),
        availability: pass_check(),
    }
}

pub(crate) fn gate_report_with(gate: &str, status: GateStatus) -> GateReport {
    let mut report = gate_report_all_pass();
    let check = GateCheck {
        status,
        detail: format!("{gate} flagged for testing"),
    };
    match gate {
        "salary" => report.salary = check,
        "commute" => report.commute = check,
        "work_auth" => report.work_auth = check,
        "availability" => report.availability = check,
        other => panic!("unknown gate fixture '{other}'"),
    }
    report
}

pub(crate) fn fit_factors_even(score: u8) -> FitFactors {
    FitFactors {
        skills: SkillFitBreakdown {
            score,
            matched: vec!["typescript".to_string()],
            missing: Vec::new(),
            transferable: Vec::new(),
        },
        experience: ExperienceFitBreakdown {
            score,
            gap_years: 0.0,
        },
        industry: IndustryFitBreakdown {
            score,
            matched_industry: None,
        },
    }
}

pub(crate) fn constraint_factors_even(score: u8) -> ConstraintFactors {
    ConstraintFactors {
        salary: SalaryConstraint {
            score,
            gap: 0,
            negotiable: false,
        },
        commute: CommuteConstraint {
            score,
            minutes: Some(30),
            confirmed: true,
        },
        start_date: StartDateConstraint {
            score,
            days_late: 0,
        },
    }
}

/// Repository whose every call reports the store as offline, for exercising
/// the retryable error path.
pub(crate) struct UnavailableRepository;

impl MatchRepository for UnavailableRepository {
    fn insert_result(
        &self,
        _result: MatchResult,
    ) -> Result<MatchResultId, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch_result(
        &self,
        _id: &MatchResultId,
    ) -> Result<Option<StoredMatch>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn record_outcome(&self, _outcome: Outcome) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn outcomes_for_version(
        &self,
        _version: &str,
    ) -> Result<Vec<(StoredMatch, Outcome)>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}
