use super::config::ScoringConfig;
use super::domain::{
    CommuteConstraint, ConstraintFactors, MatchInput, SalaryConstraint, StartDateConstraint,
};

// Sub-score floors at the gate thresholds; past a hard threshold the factor
// bottoms out instead of going negative.
const SALARY_FLOOR: f64 = 20.0;
const COMMUTE_FLOOR: f64 = 25.0;
const COMMUTE_BEYOND_HARD_CAP: u8 = 10;
const START_WARN_FLOOR: f64 = 60.0;
const START_WINDOW_FLOOR: f64 = 10.0;
const START_BEYOND_WINDOW: u8 = 5;

/// Score practical feasibility: salary gap, commute distance, and start-date
/// proximity. Pure function of the snapshot.
pub fn score_constraints(input: &MatchInput, config: &ScoringConfig) -> (u8, ConstraintFactors) {
    let salary = score_salary(input, config);
    let commute = score_commute(input, config);
    let start_date = score_start_date(input, config);

    let weights = &config.constraint_weights;
    let blended = f64::from(salary.score) * weights.salary
        + f64::from(commute.score) * weights.commute
        + f64::from(start_date.score) * weights.start_date;
    let constraint_score = blended.round().clamp(0.0, 100.0) as u8;

    (
        constraint_score,
        ConstraintFactors {
            salary,
            commute,
            start_date,
        },
    )
}

fn score_salary(input: &MatchInput, config: &ScoringConfig) -> SalaryConstraint {
    let expected = input.candidate.expected_salary;
    let ceiling = input.job.salary_ceiling;
    let negotiable = input.candidate.salary_negotiable;

    if expected <= ceiling {
        return SalaryConstraint {
            score: 100,
            gap: 0,
            negotiable,
        };
    }

    let gap = expected - ceiling;
    let overshoot = f64::from(gap) / f64::from(ceiling);

    let score = if overshoot >= config.salary_tolerance {
        SALARY_FLOOR as u8
    } else {
        // Linear decay from 100 at the ceiling to the floor at the gate's
        // fail tolerance; beyond it the factor stays at the floor, so the
        // curve is continuous across the gate boundary.
        let span = overshoot / config.salary_tolerance;
        (100.0 - span * (100.0 - SALARY_FLOOR)).round() as u8
    };

    SalaryConstraint {
        score,
        gap,
        negotiable,
    }
}

fn score_commute(input: &MatchInput, config: &ScoringConfig) -> CommuteConstraint {
    let minutes = input.candidate.commute_minutes;
    let confirmed = input.candidate.commute_confirmed;

    if input.job.remote_policy.is_remote_eligible() {
        return CommuteConstraint {
            score: 100,
            minutes,
            confirmed,
        };
    }

    let commute = minutes.unwrap_or_default();
    let soft = f64::from(config.commute_soft_cap_minutes);
    let hard = f64::from(config.commute_hard_cap_minutes);

    let score = if f64::from(commute) <= soft {
        100
    } else if f64::from(commute) > hard {
        COMMUTE_BEYOND_HARD_CAP
    } else {
        let span = (f64::from(commute) - soft) / (hard - soft);
        (100.0 - span * (100.0 - COMMUTE_FLOOR)).round() as u8
    };

    CommuteConstraint {
        score,
        minutes,
        confirmed,
    }
}

fn score_start_date(input: &MatchInput, config: &ScoringConfig) -> StartDateConstraint {
    let days_late = (input.candidate.earliest_start - input.job.target_start).num_days();

    if days_late <= 0 {
        return StartDateConstraint {
            score: 100,
            days_late: 0,
        };
    }

    let buffer = config.availability_warn_buffer_days as f64;
    let window = config.availability_fail_window_days as f64;
    let late = days_late as f64;

    let score = if late <= buffer {
        // Gentle decay inside the warn buffer.
        let span = late / buffer;
        (100.0 - span * (100.0 - START_WARN_FLOOR)).round() as u8
    } else if late <= window {
        let span = (late - buffer) / (window - buffer);
        (START_WARN_FLOOR - span * (START_WARN_FLOOR - START_WINDOW_FLOOR)).round() as u8
    } else {
        START_BEYOND_WINDOW
    };

    StartDateConstraint { score, days_late }
}
