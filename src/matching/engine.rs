use std::sync::Arc;

use super::combiner::{deal_probability, explain, overall_match};
use super::config::ScoringConfig;
use super::constraints::score_constraints;
use super::domain::{MatchInput, MatchResult, MomentumSignals};
use super::fit::score_fit;
use super::gates::{evaluate_gates, validate_input, InputValidationError};
use super::skills::{normalize_skills, OfflineClassifier, SkillClassifier};

/// Stateless evaluator producing a fresh, versioned `MatchResult` per call.
/// Gates, fit, and constraints are pure functions of the same snapshot; the
/// classifier is the only collaborator that may touch the outside world.
pub struct MatchEngine {
    config: ScoringConfig,
    classifier: Arc<dyn SkillClassifier>,
}

impl MatchEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_classifier(config, Arc::new(OfflineClassifier))
    }

    pub fn with_classifier(config: ScoringConfig, classifier: Arc<dyn SkillClassifier>) -> Self {
        Self { config, classifier }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Evaluate one candidate-job snapshot. Total for any well-formed input;
    /// only missing gate prerequisites are rejected, before anything is
    /// computed.
    pub fn evaluate(&self, input: &MatchInput) -> Result<MatchResult, InputValidationError> {
        self.evaluate_with_momentum(input, None)
    }

    pub fn evaluate_with_momentum(
        &self,
        input: &MatchInput,
        momentum: Option<&MomentumSignals>,
    ) -> Result<MatchResult, InputValidationError> {
        validate_input(input)?;

        let candidate_skills = normalize_skills(&input.candidate.skills, self.classifier.as_ref());

        let gates = evaluate_gates(input, &self.config);
        let (fit_score, fit_factors) = score_fit(&candidate_skills, input, &self.config);
        let (constraint_score, constraint_factors) = score_constraints(input, &self.config);

        let overall = overall_match(&gates, fit_score, constraint_score, &self.config);
        let deal = deal_probability(overall, momentum);
        let explainability = explain(
            &gates,
            &fit_factors,
            &constraint_factors,
            overall,
            &self.config,
        );

        Ok(MatchResult {
            version: self.config.version.clone(),
            gates,
            fit_score,
            fit_factors,
            constraint_score,
            constraint_factors,
            overall_match: overall,
            deal_probability: deal,
            explainability,
        })
    }
}
