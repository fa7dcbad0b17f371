use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted match results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResultId(pub String);

/// Remote policy advertised on the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemotePolicy {
    Onsite,
    Hybrid,
    Remote,
}

impl RemotePolicy {
    /// Remote-eligible roles bypass the commute gate entirely.
    pub const fn is_remote_eligible(self) -> bool {
        matches!(self, RemotePolicy::Remote)
    }
}

/// Seniority band requested by the job, mapped to a minimum years threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub const fn minimum_years(self) -> f32 {
        match self {
            ExperienceLevel::Junior => 0.0,
            ExperienceLevel::Mid => 3.0,
            ExperienceLevel::Senior => 6.0,
            ExperienceLevel::Lead => 9.0,
        }
    }
}

/// Candidate side of the snapshot consumed by one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub skills: Vec<String>,
    pub experience_years: f32,
    pub industries: Vec<String>,
    pub expected_salary: u32,
    pub salary_negotiable: bool,
    /// Estimated one-way commute to the job site, minutes. `None` is
    /// acceptable only for remote-eligible roles.
    pub commute_minutes: Option<u32>,
    /// Whether the commute estimate came from a verified address.
    pub commute_confirmed: bool,
    pub has_work_authorization: bool,
    pub earliest_start: NaiveDate,
}

/// Job side of the snapshot consumed by one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    pub required_skills: Vec<String>,
    pub nice_to_have_skills: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub industry: Option<String>,
    pub salary_ceiling: u32,
    pub remote_policy: RemotePolicy,
    pub target_start: NaiveDate,
    pub requires_work_authorization: bool,
    pub sponsorship_available: bool,
}

/// Immutable snapshot evaluated by one scoring run. Assembled by the caller;
/// the engine never fetches its own inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    pub candidate: CandidateProfile,
    pub job: JobSpec,
}

/// How a raw skill string was resolved against the canonical vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMatchType {
    Exact,
    Alias,
    Fuzzy,
    Ai,
}

/// One raw skill string mapped into the controlled vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSkill {
    pub original: String,
    pub canonical: String,
    pub category: Option<String>,
    pub confidence: u8,
    pub match_type: SkillMatchType,
}

/// Verdict for a single eligibility gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateStatus {
    Pass,
    Warn,
    Fail,
}

impl GateStatus {
    pub const fn label(self) -> &'static str {
        match self {
            GateStatus::Pass => "pass",
            GateStatus::Warn => "warn",
            GateStatus::Fail => "fail",
        }
    }

    /// Worst-of ordering: fail dominates warn dominates pass.
    pub fn worst(self, other: GateStatus) -> GateStatus {
        self.max(other)
    }
}

/// Single gate verdict with a human-readable detail line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateCheck {
    pub status: GateStatus,
    pub detail: String,
}

/// All four eligibility gates for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateReport {
    pub salary: GateCheck,
    pub commute: GateCheck,
    pub work_auth: GateCheck,
    pub availability: GateCheck,
}

impl GateReport {
    pub fn overall(&self) -> GateStatus {
        self.salary
            .status
            .worst(self.commute.status)
            .worst(self.work_auth.status)
            .worst(self.availability.status)
    }

    /// Gates in warn or fail state, paired with their names.
    pub fn flagged(&self) -> Vec<(&'static str, &GateCheck)> {
        self.named()
            .into_iter()
            .filter(|(_, check)| check.status != GateStatus::Pass)
            .collect()
    }

    pub fn named(&self) -> [(&'static str, &GateCheck); 4] {
        [
            ("salary", &self.salary),
            ("commute", &self.commute),
            ("work authorization", &self.work_auth),
            ("availability", &self.availability),
        ]
    }
}

/// Skill sub-factor breakdown reported by the fit scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillFitBreakdown {
    pub score: u8,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub transferable: Vec<String>,
}

/// Experience sub-factor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceFitBreakdown {
    pub score: u8,
    /// Years short of the level minimum; zero when the candidate meets it.
    pub gap_years: f32,
}

/// Industry sub-factor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryFitBreakdown {
    pub score: u8,
    pub matched_industry: Option<String>,
}

/// Fit score with its sub-factor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitFactors {
    pub skills: SkillFitBreakdown,
    pub experience: ExperienceFitBreakdown,
    pub industry: IndustryFitBreakdown,
}

/// Salary feasibility sub-factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryConstraint {
    pub score: u8,
    /// Amount by which the expectation exceeds the ceiling; zero when within.
    pub gap: u32,
    pub negotiable: bool,
}

/// Commute feasibility sub-factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommuteConstraint {
    pub score: u8,
    pub minutes: Option<u32>,
    pub confirmed: bool,
}

/// Start-date feasibility sub-factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartDateConstraint {
    pub score: u8,
    /// Days the earliest start lands after the job's target; zero when on time.
    pub days_late: i64,
}

/// Constraint score with its sub-factor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintFactors {
    pub salary: SalaryConstraint,
    pub commute: CommuteConstraint,
    pub start_date: StartDateConstraint,
}

/// Human-readable account of how the numbers came about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explainability {
    pub top_reasons: Vec<String>,
    pub top_risks: Vec<String>,
    pub next_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why_not: Option<String>,
}

/// Persisted output of one scoring run. Append-only: a re-evaluation produces
/// a fresh result rather than editing this one, preserving prediction history
/// for calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub version: String,
    pub gates: GateReport,
    pub fit_score: u8,
    pub fit_factors: FitFactors,
    pub constraint_score: u8,
    pub constraint_factors: ConstraintFactors,
    pub overall_match: u8,
    pub deal_probability: u8,
    pub explainability: Explainability,
}

/// Terminal state of a match once reality catches up with the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Hired,
    Rejected,
    Withdrew,
    Expired,
}

impl OutcomeKind {
    pub const fn label(self) -> &'static str {
        match self {
            OutcomeKind::Hired => "hired",
            OutcomeKind::Rejected => "rejected",
            OutcomeKind::Withdrew => "withdrew",
            OutcomeKind::Expired => "expired",
        }
    }
}

/// Rejection taxonomy for post-mortem analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionCategory {
    Skills,
    Experience,
    Salary,
    Culture,
    Availability,
    Other,
}

/// Immutable realized outcome, back-referencing the prediction it settles.
/// A correction is a new superseding record, never an in-place edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub match_result_id: MatchResultId,
    pub outcome: OutcomeKind,
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_category: Option<RejectionCategory>,
    pub recorded_at: DateTime<Utc>,
}

/// Caller-supplied momentum adjustment applied to the deal probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumSignals {
    /// Recent engagement in `[-1.0, 1.0]`; positive values nudge the deal
    /// probability up by a bounded amount.
    pub recent_engagement: f64,
}
