use std::collections::HashMap;

use super::config::ScoringConfig;
use super::domain::{
    ExperienceFitBreakdown, FitFactors, IndustryFitBreakdown, MatchInput, NormalizedSkill,
    SkillFitBreakdown, SkillMatchType,
};
use super::skills::canonical_form;

/// Weight of the required list against the nice-to-have list when both are
/// present on the job.
const REQUIRED_SHARE: f64 = 0.75;

/// Credit granted for a transferable skill relative to a full match.
const TRANSFERABLE_CREDIT: f64 = 0.5;

/// Score how well the candidate's qualifications match the job requirements.
/// Pure function of the snapshot plus the already-normalized skill list.
pub fn score_fit(
    candidate_skills: &[NormalizedSkill],
    input: &MatchInput,
    config: &ScoringConfig,
) -> (u8, FitFactors) {
    let skills = score_skills(candidate_skills, input, config);
    let experience = score_experience(input);
    let industry = score_industry(input, config);

    let weights = &config.fit_weights;
    let blended = f64::from(skills.score) * weights.skills
        + f64::from(experience.score) * weights.experience
        + f64::from(industry.score) * weights.industry;
    let fit_score = blended.round().clamp(0.0, 100.0) as u8;

    (
        fit_score,
        FitFactors {
            skills,
            experience,
            industry,
        },
    )
}

enum RequirementVerdict {
    Matched,
    Transferable,
    Missing,
}

fn classify_requirement(
    canonical: &str,
    by_canonical: &HashMap<&str, &NormalizedSkill>,
    config: &ScoringConfig,
) -> RequirementVerdict {
    match by_canonical.get(canonical) {
        None => RequirementVerdict::Missing,
        Some(skill) => match skill.match_type {
            SkillMatchType::Exact | SkillMatchType::Alias => RequirementVerdict::Matched,
            SkillMatchType::Fuzzy | SkillMatchType::Ai => {
                if skill.confidence >= config.transferable_confidence {
                    RequirementVerdict::Matched
                } else {
                    RequirementVerdict::Transferable
                }
            }
        },
    }
}

fn score_skills(
    candidate_skills: &[NormalizedSkill],
    input: &MatchInput,
    config: &ScoringConfig,
) -> SkillFitBreakdown {
    // Keep the highest-confidence entry per canonical term; this is where
    // duplicate raw strings collapse.
    let mut by_canonical: HashMap<&str, &NormalizedSkill> = HashMap::new();
    for skill in candidate_skills {
        by_canonical
            .entry(skill.canonical.as_str())
            .and_modify(|existing| {
                if skill.confidence > existing.confidence {
                    *existing = skill;
                }
            })
            .or_insert(skill);
    }

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut transferable = Vec::new();

    let mut tally = |raw_list: &[String]| -> Option<f64> {
        let mut canonicals: Vec<String> = Vec::new();
        for raw in raw_list {
            let canonical = canonical_form(raw);
            if !canonicals.contains(&canonical) {
                canonicals.push(canonical);
            }
        }
        if canonicals.is_empty() {
            return None;
        }

        let mut credit = 0.0;
        for canonical in &canonicals {
            match classify_requirement(canonical, &by_canonical, config) {
                RequirementVerdict::Matched => {
                    credit += 1.0;
                    matched.push(canonical.clone());
                }
                RequirementVerdict::Transferable => {
                    credit += TRANSFERABLE_CREDIT;
                    transferable.push(canonical.clone());
                }
                RequirementVerdict::Missing => missing.push(canonical.clone()),
            }
        }
        Some(credit / canonicals.len() as f64)
    };

    let required = tally(&input.job.required_skills);
    let nice_to_have = tally(&input.job.nice_to_have_skills);

    let fraction = match (required, nice_to_have) {
        (Some(req), Some(nice)) => req * REQUIRED_SHARE + nice * (1.0 - REQUIRED_SHARE),
        (Some(req), None) => req,
        (None, Some(nice)) => nice,
        // A job with no skill requirements at all scores zero here rather
        // than erroring; the other sub-factors still contribute.
        (None, None) => 0.0,
    };

    SkillFitBreakdown {
        score: (fraction * 100.0).round().clamp(0.0, 100.0) as u8,
        matched,
        missing,
        transferable,
    }
}

fn score_experience(input: &MatchInput) -> ExperienceFitBreakdown {
    let minimum = input.job.experience_level.minimum_years();
    let actual = input.candidate.experience_years;
    let gap_years = (minimum - actual).max(0.0);

    let score = if actual >= minimum {
        100
    } else if gap_years <= 2.0 {
        70
    } else {
        30
    };

    ExperienceFitBreakdown { score, gap_years }
}

fn score_industry(input: &MatchInput, config: &ScoringConfig) -> IndustryFitBreakdown {
    let Some(job_industry) = input.job.industry.as_deref() else {
        return IndustryFitBreakdown {
            score: 100,
            matched_industry: None,
        };
    };

    let wanted = job_industry.trim().to_lowercase();
    let matched_industry = input
        .candidate
        .industries
        .iter()
        .find(|industry| industry.trim().to_lowercase() == wanted)
        .cloned();

    match matched_industry {
        Some(industry) => IndustryFitBreakdown {
            score: 100,
            matched_industry: Some(industry),
        },
        None => IndustryFitBreakdown {
            score: config.industry_partial_default,
            matched_industry: None,
        },
    }
}
