use super::config::ScoringConfig;
use super::domain::{GateCheck, GateReport, GateStatus, MatchInput, RemotePolicy};

/// Validation errors raised before any scoring happens. Nothing is computed or
/// persisted when one of these fires.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InputValidationError {
    #[error("job salary ceiling is required for the salary gate")]
    MissingSalaryCeiling,
    #[error("candidate expected salary is required for the salary gate")]
    MissingExpectedSalary,
    #[error("commute estimate is required for {policy} roles")]
    MissingCommuteEstimate { policy: &'static str },
}

/// Check the snapshot carries every field the gate evaluator needs.
pub fn validate_input(input: &MatchInput) -> Result<(), InputValidationError> {
    if input.job.salary_ceiling == 0 {
        return Err(InputValidationError::MissingSalaryCeiling);
    }
    if input.candidate.expected_salary == 0 {
        return Err(InputValidationError::MissingExpectedSalary);
    }

    if !input.job.remote_policy.is_remote_eligible() && input.candidate.commute_minutes.is_none() {
        let policy = match input.job.remote_policy {
            RemotePolicy::Onsite => "onsite",
            RemotePolicy::Hybrid => "hybrid",
            RemotePolicy::Remote => unreachable!("remote roles skip the commute gate"),
        };
        return Err(InputValidationError::MissingCommuteEstimate { policy });
    }

    Ok(())
}

/// Pure gate evaluation over a validated snapshot. A failing gate never aborts
/// the pipeline; it only flags the result for downstream blocking logic owned
/// by the caller.
pub fn evaluate_gates(input: &MatchInput, config: &ScoringConfig) -> GateReport {
    GateReport {
        salary: salary_gate(input, config),
        commute: commute_gate(input, config),
        work_auth: work_auth_gate(input),
        availability: availability_gate(input, config),
    }
}

fn salary_gate(input: &MatchInput, config: &ScoringConfig) -> GateCheck {
    let expected = f64::from(input.candidate.expected_salary);
    let ceiling = f64::from(input.job.salary_ceiling);
    let fail_threshold = ceiling * (1.0 + config.salary_tolerance);

    if expected <= ceiling {
        return GateCheck {
            status: GateStatus::Pass,
            detail: format!("expectation {expected:.0} within ceiling {ceiling:.0}"),
        };
    }

    if expected <= fail_threshold {
        return GateCheck {
            status: GateStatus::Warn,
            detail: format!(
                "expectation {expected:.0} exceeds ceiling {ceiling:.0} but sits within the {:.0}% tolerance",
                config.salary_tolerance * 100.0
            ),
        };
    }

    if input.candidate.salary_negotiable {
        return GateCheck {
            status: GateStatus::Warn,
            detail: format!(
                "expectation {expected:.0} is above the tolerance threshold {fail_threshold:.0}, flagged negotiable"
            ),
        };
    }

    GateCheck {
        status: GateStatus::Fail,
        detail: format!(
            "expectation {expected:.0} exceeds the tolerance threshold {fail_threshold:.0} and is not negotiable"
        ),
    }
}

fn commute_gate(input: &MatchInput, config: &ScoringConfig) -> GateCheck {
    if input.job.remote_policy.is_remote_eligible() {
        return GateCheck {
            status: GateStatus::Pass,
            detail: "remote-eligible role; commute is not a factor".to_string(),
        };
    }

    // Validation guarantees an estimate exists for onsite/hybrid roles.
    let minutes = input.candidate.commute_minutes.unwrap_or_default();
    let soft = config.commute_soft_cap_minutes;
    let hard = config.commute_hard_cap_minutes;

    if minutes > hard {
        // Only fully onsite roles block on commute; hybrid presence softens
        // the verdict to a warning.
        return match input.job.remote_policy {
            RemotePolicy::Onsite => GateCheck {
                status: GateStatus::Fail,
                detail: format!("one-way commute {minutes} min exceeds the {hard} min hard cap"),
            },
            _ => GateCheck {
                status: GateStatus::Warn,
                detail: format!(
                    "one-way commute {minutes} min exceeds the {hard} min hard cap for onsite days"
                ),
            },
        };
    }

    if minutes > soft {
        return GateCheck {
            status: GateStatus::Warn,
            detail: format!("one-way commute {minutes} min exceeds the {soft} min soft cap"),
        };
    }

    GateCheck {
        status: GateStatus::Pass,
        detail: format!("one-way commute {minutes} min within the {soft} min soft cap"),
    }
}

fn work_auth_gate(input: &MatchInput) -> GateCheck {
    if !input.job.requires_work_authorization {
        return GateCheck {
            status: GateStatus::Pass,
            detail: "job does not require work authorization".to_string(),
        };
    }

    if input.candidate.has_work_authorization {
        return GateCheck {
            status: GateStatus::Pass,
            detail: "candidate holds the required work authorization".to_string(),
        };
    }

    if input.job.sponsorship_available {
        return GateCheck {
            status: GateStatus::Pass,
            detail: "authorization missing but the job offers sponsorship".to_string(),
        };
    }

    // Binary gate: no warn state.
    GateCheck {
        status: GateStatus::Fail,
        detail: "job requires authorization the candidate does not hold and no sponsorship is offered"
            .to_string(),
    }
}

fn availability_gate(input: &MatchInput, config: &ScoringConfig) -> GateCheck {
    let days_late = (input.candidate.earliest_start - input.job.target_start).num_days();

    if days_late <= 0 {
        return GateCheck {
            status: GateStatus::Pass,
            detail: "earliest start on or before the job's target date".to_string(),
        };
    }

    if days_late > config.availability_fail_window_days {
        return GateCheck {
            status: GateStatus::Fail,
            detail: format!(
                "earliest start is {days_late} days past the target, beyond the {} day window",
                config.availability_fail_window_days
            ),
        };
    }

    let buffer = config.availability_warn_buffer_days;
    let detail = if days_late <= buffer {
        format!("earliest start is {days_late} days past the target, within the {buffer} day buffer")
    } else {
        format!(
            "earliest start is {days_late} days past the target, past the {buffer} day buffer"
        )
    };

    GateCheck {
        status: GateStatus::Warn,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::tests::fixtures::{base_input, onsite_job};
    use chrono::Duration;

    #[test]
    fn all_gates_pass_for_the_baseline_fixture() {
        let input = base_input();
        let report = evaluate_gates(&input, &ScoringConfig::default());

        assert_eq!(report.overall(), GateStatus::Pass);
        assert!(report.flagged().is_empty());
    }

    #[test]
    fn overall_gate_is_the_worst_individual_gate() {
        let mut input = base_input();
        input.candidate.expected_salary = input.job.salary_ceiling + 1;
        input.candidate.has_work_authorization = false;
        input.job.requires_work_authorization = true;
        input.job.sponsorship_available = false;

        let report = evaluate_gates(&input, &ScoringConfig::default());
        assert_eq!(report.salary.status, GateStatus::Warn);
        assert_eq!(report.work_auth.status, GateStatus::Fail);
        assert_eq!(report.overall(), GateStatus::Fail);
    }

    #[test]
    fn salary_within_tolerance_warns_not_fails() {
        // Expectation 70k against a 65k ceiling with 15% tolerance
        // (fail threshold 74.75k) lands in the warn band.
        let mut input = base_input();
        input.candidate.expected_salary = 70_000;
        input.candidate.salary_negotiable = false;
        input.job.salary_ceiling = 65_000;

        let report = evaluate_gates(&input, &ScoringConfig::default());
        assert_eq!(report.salary.status, GateStatus::Warn);
    }

    #[test]
    fn salary_beyond_tolerance_fails_unless_negotiable() {
        let mut input = base_input();
        input.candidate.expected_salary = 80_000;
        input.candidate.salary_negotiable = false;
        input.job.salary_ceiling = 65_000;

        let config = ScoringConfig::default();
        let report = evaluate_gates(&input, &config);
        assert_eq!(report.salary.status, GateStatus::Fail);

        input.candidate.salary_negotiable = true;
        let report = evaluate_gates(&input, &config);
        assert_eq!(report.salary.status, GateStatus::Warn);
    }

    #[test]
    fn onsite_commute_over_the_hard_cap_fails() {
        let mut input = base_input();
        input.job = onsite_job();
        input.candidate.commute_minutes = Some(100);

        let report = evaluate_gates(&input, &ScoringConfig::default());
        assert_eq!(report.commute.status, GateStatus::Fail);
        assert_eq!(report.overall(), GateStatus::Fail);
    }

    #[test]
    fn remote_roles_always_pass_the_commute_gate() {
        let mut input = base_input();
        input.job.remote_policy = RemotePolicy::Remote;
        input.candidate.commute_minutes = Some(500);

        let report = evaluate_gates(&input, &ScoringConfig::default());
        assert_eq!(report.commute.status, GateStatus::Pass);
    }

    #[test]
    fn hybrid_commute_over_the_hard_cap_warns_instead_of_failing() {
        let mut input = base_input();
        input.job.remote_policy = RemotePolicy::Hybrid;
        input.candidate.commute_minutes = Some(120);

        let report = evaluate_gates(&input, &ScoringConfig::default());
        assert_eq!(report.commute.status, GateStatus::Warn);
    }

    #[test]
    fn availability_windows_drive_the_gate() {
        let config = ScoringConfig::default();
        let mut input = base_input();

        input.candidate.earliest_start = input.job.target_start + Duration::days(30);
        let report = evaluate_gates(&input, &config);
        assert_eq!(report.availability.status, GateStatus::Warn);

        input.candidate.earliest_start = input.job.target_start + Duration::days(150);
        let report = evaluate_gates(&input, &config);
        assert_eq!(report.availability.status, GateStatus::Fail);
    }

    #[test]
    fn missing_commute_estimate_fails_validation_for_onsite_roles() {
        let mut input = base_input();
        input.job = onsite_job();
        input.candidate.commute_minutes = None;

        let err = validate_input(&input).expect_err("validation should fail");
        assert!(matches!(
            err,
            InputValidationError::MissingCommuteEstimate { policy: "onsite" }
        ));
    }

    #[test]
    fn missing_salary_ceiling_fails_validation() {
        let mut input = base_input();
        input.job.salary_ceiling = 0;

        let err = validate_input(&input).expect_err("validation should fail");
        assert!(matches!(err, InputValidationError::MissingSalaryCeiling));
    }
}
