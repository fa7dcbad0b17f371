use std::collections::HashMap;
use std::sync::LazyLock;

use strsim::jaro_winkler;

use super::domain::{NormalizedSkill, SkillMatchType};

/// Controlled vocabulary: canonical term -> category.
static CANONICAL_SKILLS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    VOCABULARY
        .iter()
        .map(|(canonical, category, _)| (*canonical, *category))
        .collect()
});

/// Alias -> canonical lookup built from the same vocabulary table.
static ALIAS_TO_CANONICAL: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (canonical, _, aliases) in VOCABULARY {
        for alias in *aliases {
            map.insert(*alias, *canonical);
        }
    }
    map
});

/// (canonical, category, aliases). Aliases are matched case-insensitively
/// after trimming; canonical terms themselves resolve via the exact tier.
const VOCABULARY: &[(&str, &str, &[&str])] = &[
    (
        "javascript",
        "language",
        &["js", "ecmascript", "es6", "es2020"],
    ),
    ("typescript", "language", &["ts"]),
    ("python", "language", &["python3", "py"]),
    ("java", "language", &["java8", "java11", "java17", "openjdk"]),
    ("csharp", "language", &["c#", "c sharp", ".net", "dotnet"]),
    ("golang", "language", &["go", "go lang"]),
    ("rust", "language", &["rust lang"]),
    ("ruby", "language", &["ruby on rails", "rails", "ror"]),
    ("php", "language", &["php7", "php8"]),
    ("kotlin", "language", &["kotlin jvm"]),
    ("swift", "language", &["ios swift"]),
    ("sql", "language", &["ansi sql", "tsql", "plsql"]),
    (
        "react",
        "frontend",
        &["reactjs", "react.js", "react js", "react18"],
    ),
    ("redux", "frontend", &["redux toolkit", "react redux"]),
    ("angular", "frontend", &["angularjs", "angular.js"]),
    ("vue", "frontend", &["vuejs", "vue.js", "vue3"]),
    ("nextjs", "frontend", &["next.js", "next js"]),
    ("css", "frontend", &["css3", "scss", "sass"]),
    ("html", "frontend", &["html5"]),
    ("nodejs", "backend", &["node.js", "node js", "node"]),
    ("django", "backend", &["django rest framework", "drf"]),
    ("flask", "backend", &["python flask"]),
    ("spring", "backend", &["spring boot", "springboot"]),
    ("graphql", "backend", &["graph ql", "apollo graphql"]),
    ("rest", "backend", &["rest api", "restful", "restful api"]),
    (
        "postgresql",
        "database",
        &["postgres", "pg", "postgre sql"],
    ),
    ("mysql", "database", &["my sql", "mariadb"]),
    ("mongodb", "database", &["mongo", "mongo db"]),
    ("redis", "database", &["redis cache"]),
    ("elasticsearch", "database", &["elastic search"]),
    (
        "aws",
        "cloud",
        &["amazon web services", "aws cloud", "ec2", "s3"],
    ),
    ("gcp", "cloud", &["google cloud", "google cloud platform"]),
    ("azure", "cloud", &["microsoft azure", "ms azure"]),
    ("docker", "devops", &["docker container", "containers"]),
    ("kubernetes", "devops", &["k8s", "kube"]),
    ("terraform", "devops", &["infrastructure as code", "iac"]),
    (
        "cicd",
        "devops",
        &["ci/cd", "ci cd", "continuous integration", "jenkins", "github actions"],
    ),
    ("git", "devops", &["version control", "github", "gitlab"]),
    ("linux", "devops", &["unix", "bash", "shell scripting"]),
    (
        "machine learning",
        "data",
        &["ml", "deep learning", "neural networks"],
    ),
    ("pandas", "data", &["python pandas"]),
    ("spark", "data", &["apache spark", "pyspark"]),
    ("kafka", "data", &["apache kafka", "event streaming"]),
    (
        "data analysis",
        "data",
        &["analytics", "data analytics", "business intelligence", "bi"],
    ),
    (
        "project management",
        "general",
        &["pm", "agile", "scrum", "scrum master", "kanban"],
    ),
    (
        "account management",
        "general",
        &["client management", "customer success", "relationship management"],
    ),
    (
        "sales",
        "general",
        &["business development", "bd", "outbound sales", "b2b sales"],
    ),
    (
        "recruiting",
        "general",
        &["talent acquisition", "sourcing", "technical recruiting"],
    ),
];

// Jaro-Winkler floor for the fuzzy tier. Tokens shorter than four characters
// skip fuzzy matching entirely to avoid false positives on brief inputs.
const FUZZY_SIMILARITY_THRESHOLD: f64 = 0.88;
const FUZZY_MIN_TOKEN_LEN: usize = 4;

/// Confidence the normalizer assigns when it has to give up locally and the
/// classification collaborator is unavailable.
const DEGRADED_CONFIDENCE: u8 = 20;

/// Upper bound of the ai-tier confidence band. A classifier answer never
/// outranks a local fuzzy match, whatever confidence the collaborator reports.
const AI_CONFIDENCE_CAP: u8 = 50;

/// Structured answer from the free-text classification collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillClassification {
    pub canonical: String,
    pub category: Option<String>,
    /// Confidence as reported by the collaborator; the normalizer caps it to
    /// the ai band and treats absent values as the cap.
    pub confidence: Option<u8>,
}

/// The collaborator timed out or errored. Recovered inside the normalizer and
/// never surfaced to callers of the pipeline.
#[derive(Debug, Clone, thiserror::Error)]
#[error("skill classification collaborator unavailable: {0}")]
pub struct ClassificationUnavailable(pub String);

/// Capability boundary for the last-resort free-text classifier. Any
/// implementation (rule engine, embedding lookup, hosted model) satisfying
/// this contract is acceptable; implementations must bound their own latency
/// and report `ClassificationUnavailable` on timeout.
pub trait SkillClassifier: Send + Sync {
    fn classify(&self, raw: &str) -> Result<SkillClassification, ClassificationUnavailable>;
}

/// Default classifier for deployments without a text-generation collaborator:
/// always unavailable, so unknown skills degrade to low-confidence fuzzy.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineClassifier;

impl SkillClassifier for OfflineClassifier {
    fn classify(&self, _raw: &str) -> Result<SkillClassification, ClassificationUnavailable> {
        Err(ClassificationUnavailable("no classifier configured".into()))
    }
}

fn clean(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn category_of(canonical: &str) -> Option<String> {
    CANONICAL_SKILLS
        .get(canonical)
        .map(|category| (*category).to_string())
}

/// Best local fuzzy candidate over canonical terms and aliases.
fn fuzzy_candidate(token: &str) -> Option<(&'static str, f64)> {
    if token.len() < FUZZY_MIN_TOKEN_LEN {
        return None;
    }

    let mut best: Option<(&'static str, f64)> = None;
    let consider = |best: &mut Option<(&'static str, f64)>, canonical: &'static str, term: &str| {
        if term.len() < FUZZY_MIN_TOKEN_LEN {
            return;
        }
        let similarity = jaro_winkler(token, term);
        if similarity < FUZZY_SIMILARITY_THRESHOLD {
            return;
        }
        match best {
            Some((_, current)) if *current >= similarity => {}
            _ => *best = Some((canonical, similarity)),
        }
    };

    for (canonical, _, aliases) in VOCABULARY {
        consider(&mut best, canonical, canonical);
        for alias in *aliases {
            consider(&mut best, canonical, alias);
        }
    }

    best
}

/// Scale a similarity in `[threshold, 1.0)` into the fuzzy confidence band.
fn fuzzy_confidence(similarity: f64) -> u8 {
    let span = (similarity - FUZZY_SIMILARITY_THRESHOLD) / (1.0 - FUZZY_SIMILARITY_THRESHOLD);
    (40.0 + span.clamp(0.0, 1.0) * 30.0).round() as u8
}

fn normalize_one(raw: &str, classifier: &dyn SkillClassifier) -> NormalizedSkill {
    let token = clean(raw);

    if CANONICAL_SKILLS.contains_key(token.as_str()) {
        return NormalizedSkill {
            original: raw.to_string(),
            canonical: token.clone(),
            category: category_of(&token),
            confidence: 100,
            match_type: SkillMatchType::Exact,
        };
    }

    if let Some(canonical) = ALIAS_TO_CANONICAL.get(token.as_str()) {
        return NormalizedSkill {
            original: raw.to_string(),
            canonical: (*canonical).to_string(),
            category: category_of(canonical),
            confidence: 85,
            match_type: SkillMatchType::Alias,
        };
    }

    if let Some((canonical, similarity)) = fuzzy_candidate(&token) {
        return NormalizedSkill {
            original: raw.to_string(),
            canonical: canonical.to_string(),
            category: category_of(canonical),
            confidence: fuzzy_confidence(similarity),
            match_type: SkillMatchType::Fuzzy,
        };
    }

    match classifier.classify(raw) {
        Ok(classification) => {
            let canonical = clean(&classification.canonical);
            let category = classification
                .category
                .or_else(|| category_of(&canonical));
            NormalizedSkill {
                original: raw.to_string(),
                canonical,
                category,
                confidence: classification
                    .confidence
                    .unwrap_or(AI_CONFIDENCE_CAP)
                    .min(AI_CONFIDENCE_CAP),
                match_type: SkillMatchType::Ai,
            }
        }
        // Degrade this one entry instead of failing the pipeline.
        Err(_) => NormalizedSkill {
            original: raw.to_string(),
            canonical: token,
            category: None,
            confidence: DEGRADED_CONFIDENCE,
            match_type: SkillMatchType::Fuzzy,
        },
    }
}

/// Canonicalize raw skill strings, one output per input, order preserved.
/// Deduplication is deliberately left to the fit scorer.
pub fn normalize_skills(skills: &[String], classifier: &dyn SkillClassifier) -> Vec<NormalizedSkill> {
    skills
        .iter()
        .map(|raw| normalize_one(raw, classifier))
        .collect()
}

/// Deterministic local-only canonical form for job requirement strings. Job
/// requirements never consult the classifier so requirement comparison stays
/// reproducible.
pub fn canonical_form(raw: &str) -> String {
    let token = clean(raw);
    if CANONICAL_SKILLS.contains_key(token.as_str()) {
        return token;
    }
    if let Some(canonical) = ALIAS_TO_CANONICAL.get(token.as_str()) {
        return (*canonical).to_string();
    }
    if let Some((canonical, _)) = fuzzy_candidate(&token) {
        return canonical.to_string();
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_terms_are_idempotent() {
        let skills = vec!["react".to_string(), "postgresql".to_string()];
        let normalized = normalize_skills(&skills, &OfflineClassifier);

        for skill in &normalized {
            assert_eq!(skill.match_type, SkillMatchType::Exact);
            assert_eq!(skill.confidence, 100);
        }
        assert_eq!(normalized[0].canonical, "react");
        assert_eq!(normalized[1].canonical, "postgresql");
    }

    #[test]
    fn case_and_alias_resolution() {
        let skills = vec!["React".to_string(), "K8s".to_string(), "TS".to_string()];
        let normalized = normalize_skills(&skills, &OfflineClassifier);

        assert_eq!(normalized[0].canonical, "react");
        assert_eq!(normalized[0].match_type, SkillMatchType::Exact);
        assert_eq!(normalized[1].canonical, "kubernetes");
        assert_eq!(normalized[1].match_type, SkillMatchType::Alias);
        assert_eq!(normalized[1].confidence, 85);
        assert_eq!(normalized[2].canonical, "typescript");
    }

    #[test]
    fn fuzzy_tier_catches_typos_with_scaled_confidence() {
        let normalized = normalize_skills(&["postgresql ".to_string(), "kuberntes".to_string()], &OfflineClassifier);
        assert_eq!(normalized[0].canonical, "postgresql");

        let typo = &normalized[1];
        assert_eq!(typo.canonical, "kubernetes");
        assert_eq!(typo.match_type, SkillMatchType::Fuzzy);
        assert!((40..=70).contains(&typo.confidence));
    }

    #[test]
    fn unknown_skill_degrades_without_erroring() {
        let normalized = normalize_skills(&["Underwater Basket Weaving".to_string()], &OfflineClassifier);

        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].match_type, SkillMatchType::Fuzzy);
        assert_eq!(normalized[0].confidence, DEGRADED_CONFIDENCE);
        assert_eq!(normalized[0].canonical, "underwater basket weaving");
    }

    #[test]
    fn classifier_answers_are_clamped() {
        struct FixedClassifier;
        impl SkillClassifier for FixedClassifier {
            fn classify(
                &self,
                _raw: &str,
            ) -> Result<SkillClassification, ClassificationUnavailable> {
                Ok(SkillClassification {
                    canonical: "Data Analysis".to_string(),
                    category: None,
                    confidence: None,
                })
            }
        }

        let normalized = normalize_skills(&["crunching numbers".to_string()], &FixedClassifier);
        assert_eq!(normalized[0].match_type, SkillMatchType::Ai);
        assert_eq!(normalized[0].canonical, "data analysis");
        assert_eq!(normalized[0].confidence, 50);
        assert_eq!(normalized[0].category.as_deref(), Some("data"));
    }

    #[test]
    fn overconfident_classifier_answers_are_capped_at_the_ai_band() {
        struct EagerClassifier;
        impl SkillClassifier for EagerClassifier {
            fn classify(
                &self,
                _raw: &str,
            ) -> Result<SkillClassification, ClassificationUnavailable> {
                Ok(SkillClassification {
                    canonical: "sales".to_string(),
                    category: None,
                    confidence: Some(90),
                })
            }
        }

        let normalized =
            normalize_skills(&["closing enterprise deals".to_string()], &EagerClassifier);
        assert_eq!(normalized[0].match_type, SkillMatchType::Ai);
        // The reported 90 may not leak past the ai band; downstream scoring
        // treats anything below the transferable threshold as a partial match.
        assert_eq!(normalized[0].confidence, AI_CONFIDENCE_CAP);
        assert_eq!(normalized[0].canonical, "sales");
    }

    #[test]
    fn order_is_preserved_without_dedup() {
        let skills = vec!["js".to_string(), "javascript".to_string()];
        let normalized = normalize_skills(&skills, &OfflineClassifier);

        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].canonical, normalized[1].canonical);
        assert_eq!(normalized[0].match_type, SkillMatchType::Alias);
        assert_eq!(normalized[1].match_type, SkillMatchType::Exact);
    }

    #[test]
    fn short_tokens_skip_fuzzy_matching() {
        let normalized = normalize_skills(&["rb".to_string()], &OfflineClassifier);
        assert_eq!(normalized[0].canonical, "rb");
        assert_eq!(normalized[0].confidence, DEGRADED_CONFIDENCE);
    }
}
