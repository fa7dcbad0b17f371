use super::config::ScoringConfig;
use super::domain::{
    ConstraintFactors, Explainability, FitFactors, GateReport, GateStatus, MomentumSignals,
};

/// Bounded shift a momentum signal may apply to the deal probability.
const MOMENTUM_SPAN: f64 = 15.0;

/// Merge gate, fit, and constraint outputs into the overall match percentage.
/// Total for any well-formed input; a failing gate shrinks the number, it
/// never throws.
pub fn overall_match(
    gates: &GateReport,
    fit_score: u8,
    constraint_score: u8,
    config: &ScoringConfig,
) -> u8 {
    let fit_weight = config.fit_blend_weight;
    let blended =
        f64::from(fit_score) * fit_weight + f64::from(constraint_score) * (1.0 - fit_weight);

    let adjusted = match gates.overall() {
        GateStatus::Pass => blended,
        GateStatus::Warn => blended * config.gate_warn_multiplier,
        GateStatus::Fail => blended * config.gate_fail_multiplier,
    };

    adjusted.round().clamp(0.0, 100.0) as u8
}

/// Deterministic deal-probability estimate: a monotone map of the overall
/// match, shifted by an optional caller-supplied momentum signal. Same input,
/// same output; no randomness.
pub fn deal_probability(overall_match: u8, momentum: Option<&MomentumSignals>) -> u8 {
    let base = f64::from(overall_match) * 0.85 + 5.0;
    let shift = momentum
        .map(|signals| signals.recent_engagement.clamp(-1.0, 1.0) * MOMENTUM_SPAN)
        .unwrap_or(0.0);

    (base + shift).round().clamp(0.0, 100.0) as u8
}

/// Assemble the human-readable account: top reasons, risks, the recommended
/// next action, and the why-not sentence when the overall gate fails.
pub fn explain(
    gates: &GateReport,
    fit_factors: &FitFactors,
    constraint_factors: &ConstraintFactors,
    overall: u8,
    config: &ScoringConfig,
) -> Explainability {
    let sub_scores = [
        ("skills fit", fit_factors.skills.score),
        ("experience fit", fit_factors.experience.score),
        ("industry fit", fit_factors.industry.score),
        ("salary alignment", constraint_factors.salary.score),
        ("commute feasibility", constraint_factors.commute.score),
        ("start-date alignment", constraint_factors.start_date.score),
    ];

    let mut ranked: Vec<(&str, u8)> = sub_scores.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let top_reasons: Vec<String> = ranked
        .iter()
        .filter(|(_, score)| *score >= config.high_score_threshold)
        .take(3)
        .map(|(name, score)| format!("{name} scored {score}"))
        .collect();

    let mut top_risks: Vec<String> = gates
        .flagged()
        .into_iter()
        .map(|(name, check)| format!("{name} gate {}: {}", check.status.label(), check.detail))
        .collect();
    for (name, score) in &sub_scores {
        if *score < config.low_score_threshold {
            top_risks.push(format!("low {name} score ({score})"));
        }
    }

    let overall_gate = gates.overall();
    let next_action = next_action(overall_gate, gates, overall);
    let why_not = (overall_gate == GateStatus::Fail).then(|| why_not_sentence(gates));

    Explainability {
        top_reasons,
        top_risks,
        next_action,
        why_not,
    }
}

/// Fixed decision table keyed by the overall gate and the match bucket.
fn next_action(overall_gate: GateStatus, gates: &GateReport, overall: u8) -> String {
    match overall_gate {
        GateStatus::Fail => "do not proceed".to_string(),
        GateStatus::Warn => {
            if gates.salary.status == GateStatus::Warn {
                "clarify salary expectations".to_string()
            } else {
                "resolve flagged risks before scheduling".to_string()
            }
        }
        GateStatus::Pass => {
            if overall >= 75 {
                "schedule interview".to_string()
            } else if overall >= 50 {
                "request additional screening".to_string()
            } else {
                "keep warm".to_string()
            }
        }
    }
}

fn why_not_sentence(gates: &GateReport) -> String {
    let blocking: Vec<String> = gates
        .named()
        .into_iter()
        .filter(|(_, check)| check.status == GateStatus::Fail)
        .map(|(name, check)| format!("{name} ({})", check.detail))
        .collect();

    format!("Blocked by the {} gate(s).", blocking.join("; "))
}
