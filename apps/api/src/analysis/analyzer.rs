//! Text analyzer — maps a free-text job query to likely roles, skills and work preferences.
//!
//! Two tiers:
//! 1. Pattern phase: substring hits against the role registry and skill list.
//! 2. Fallback phase (confidence < 0.7): an `EnhancedClassifier` if one is configured,
//!    otherwise a stop-word heuristic that turns the first two meaningful tokens into
//!    a role name. Every non-empty query therefore yields at least one role.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::classifier::EnhancedClassifier;
use crate::analysis::rules::ClassifierRules;
use crate::analysis::text::{title_case, word_tokens};

/// Below this the result is considered weak: fallback runs and callers are told
/// a smarter classifier could help.
pub const CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Keywords used for job search when the analysis yields nothing usable.
pub const DEFAULT_SEARCH_KEYWORDS: &str = "developer";

const MAX_PREDICTED_ROLES: usize = 3;
const FALLBACK_TOKEN_COUNT: usize = 2;
const FALLBACK_ROLE: &str = "General Position";
const FALLBACK_MIN_CONFIDENCE: f32 = 0.6;
const SKILL_ONLY_CONFIDENCE: f32 = 0.6;
const GENERIC_JOB_CONFIDENCE: f32 = 0.4;
const DEFAULT_CONFIDENCE: f32 = 0.5;

const GENERIC_JOB_WORDS: &[&str] = &["job", "position", "work", "career"];
const REMOTE_PHRASES: &[&str] = &["remote", "work from home", "wfh"];
const PART_TIME_PHRASES: &[&str] = &["part time", "part-time"];
const FREELANCE_PHRASES: &[&str] = &["freelance", "contract"];
const SENIOR_PHRASES: &[&str] = &["senior", "lead", "principal"];
const JUNIOR_PHRASES: &[&str] = &["junior", "entry", "new grad"];

/// How the predicted roles were obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    #[default]
    PatternMatching,
    FallbackPatterns,
    Enhanced,
}

/// A registry role that matched the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleMatch {
    pub role: String,
    /// min(0.9, 0.5 + 0.2 × matched keywords)
    pub confidence: f32,
    pub matched_keywords: BTreeSet<String>,
}

/// Work arrangement and seniority signals found in the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPreferences {
    pub remote: bool,
    pub part_time: bool,
    pub freelance: bool,
    pub senior: bool,
    pub junior: bool,
}

/// Structured interpretation of a query. Built once per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub query: String,
    /// At most three, confidence-descending.
    pub predicted_roles: Vec<String>,
    pub role_matches: Vec<RoleMatch>,
    pub skills: Vec<String>,
    pub preferences: WorkPreferences,
    pub confidence: f32,
    pub method: AnalysisMethod,
    /// Confidence stayed under the threshold; an enhanced classifier could do better.
    pub needs_enhancement: bool,
}

impl AnalysisResult {
    fn empty(query: &str) -> Self {
        Self {
            query: query.to_string(),
            predicted_roles: vec![],
            role_matches: vec![],
            skills: vec![],
            preferences: WorkPreferences::default(),
            confidence: 0.0,
            method: AnalysisMethod::PatternMatching,
            needs_enhancement: true,
        }
    }

    /// Keywords handed to the job aggregator: the top role plus arrangement words
    /// the synthetic source reacts to. Falls back to the raw query, then to
    /// `DEFAULT_SEARCH_KEYWORDS`.
    pub fn search_keywords(&self) -> String {
        let base = match self.predicted_roles.first() {
            Some(role) => role.clone(),
            None if !self.query.trim().is_empty() => self.query.trim().to_string(),
            None => return DEFAULT_SEARCH_KEYWORDS.to_string(),
        };

        let mut parts = vec![base];
        if self.preferences.remote {
            parts.push("remote".to_string());
        }
        if self.preferences.part_time {
            parts.push("part-time".to_string());
        }
        parts.join(" ")
    }
}

/// Pattern-based analyzer with an optional enhancement strategy.
#[derive(Clone)]
pub struct TextAnalyzer {
    rules: Arc<ClassifierRules>,
    enhancer: Option<Arc<dyn EnhancedClassifier>>,
}

impl TextAnalyzer {
    pub fn new(rules: ClassifierRules) -> Self {
        Self {
            rules: Arc::new(rules),
            enhancer: None,
        }
    }

    #[allow(dead_code)]
    pub fn with_enhancer(mut self, enhancer: Arc<dyn EnhancedClassifier>) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    /// Full analysis: pattern phase, then enhancement or stop-word fallback when weak.
    /// Empty input yields no roles and confidence 0.0.
    pub async fn analyze(&self, query: &str) -> AnalysisResult {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return AnalysisResult::empty(query);
        }

        let mut result = self.analyze_patterns(trimmed);
        result.query = query.to_string();

        if result.confidence < CONFIDENCE_THRESHOLD {
            if let Some(enhancer) = &self.enhancer {
                match enhancer.classify(trimmed).await {
                    Ok(enhanced) => {
                        info!("Query classified by enhancer '{}'", enhancer.name());
                        return normalize_enhanced(enhanced, query);
                    }
                    Err(e) => {
                        warn!(
                            "Enhancer '{}' failed, using stop-word fallback: {e}",
                            enhancer.name()
                        );
                    }
                }
            }
            self.apply_fallback(&mut result);
        }

        result.needs_enhancement = result.confidence < CONFIDENCE_THRESHOLD;

        debug!(
            roles = ?result.predicted_roles,
            confidence = result.confidence,
            method = ?result.method,
            "Query analyzed"
        );

        result
    }

    /// Pattern phase only: registry roles, skills, preferences and base confidence.
    pub fn analyze_patterns(&self, query: &str) -> AnalysisResult {
        let lowered = query.to_lowercase();

        let mut role_matches = self.match_roles(&lowered);
        role_matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        role_matches.truncate(MAX_PREDICTED_ROLES);

        let skills: Vec<String> = self
            .rules
            .skills
            .iter()
            .filter(|skill| lowered.contains(skill.as_str()))
            .map(|skill| title_case(skill))
            .collect();

        let confidence = if let Some(top) = role_matches.first() {
            top.confidence
        } else if !skills.is_empty() {
            SKILL_ONLY_CONFIDENCE
        } else if contains_any(&lowered, GENERIC_JOB_WORDS) {
            GENERIC_JOB_CONFIDENCE
        } else {
            DEFAULT_CONFIDENCE
        };

        AnalysisResult {
            query: query.to_string(),
            predicted_roles: role_matches.iter().map(|m| m.role.clone()).collect(),
            role_matches,
            skills,
            preferences: extract_preferences(&lowered),
            confidence,
            method: AnalysisMethod::PatternMatching,
            needs_enhancement: confidence < CONFIDENCE_THRESHOLD,
        }
    }

    fn match_roles(&self, lowered: &str) -> Vec<RoleMatch> {
        self.rules
            .roles
            .iter()
            .filter_map(|rule| {
                let matched: BTreeSet<String> = rule
                    .keywords
                    .iter()
                    .filter(|kw| !kw.is_empty() && lowered.contains(kw.as_str()))
                    .cloned()
                    .collect();
                if matched.is_empty() {
                    return None;
                }
                Some(RoleMatch {
                    role: rule.name.clone(),
                    confidence: role_confidence(matched.len()),
                    matched_keywords: matched,
                })
            })
            .collect()
    }

    /// Heuristic role name from the first two tokens that are not stop words.
    pub fn fallback_role(&self, query: &str) -> String {
        let lowered = query.to_lowercase();
        let tokens: Vec<String> = word_tokens(&lowered)
            .filter(|t| t.chars().count() > 2 && !self.rules.is_stop_word(t))
            .take(FALLBACK_TOKEN_COUNT)
            .map(title_case)
            .collect();

        if tokens.is_empty() {
            FALLBACK_ROLE.to_string()
        } else {
            tokens.join(" ")
        }
    }

    fn apply_fallback(&self, result: &mut AnalysisResult) {
        let role = self.fallback_role(&result.query);
        result.predicted_roles = vec![role];
        result.confidence = result.confidence.max(FALLBACK_MIN_CONFIDENCE);
        result.method = AnalysisMethod::FallbackPatterns;
    }
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(ClassifierRules::default())
    }
}

/// Computed in tenths so one match lands exactly on the threshold.
fn role_confidence(match_count: usize) -> f32 {
    let tenths = (5 + 2 * match_count).min(9);
    tenths as f32 / 10.0
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn extract_preferences(lowered: &str) -> WorkPreferences {
    WorkPreferences {
        remote: contains_any(lowered, REMOTE_PHRASES),
        part_time: contains_any(lowered, PART_TIME_PHRASES),
        freelance: contains_any(lowered, FREELANCE_PHRASES),
        senior: contains_any(lowered, SENIOR_PHRASES),
        junior: contains_any(lowered, JUNIOR_PHRASES),
    }
}

/// Enforces result invariants on whatever an enhancer hands back.
fn normalize_enhanced(mut enhanced: AnalysisResult, query: &str) -> AnalysisResult {
    enhanced.query = query.to_string();
    enhanced.predicted_roles.truncate(MAX_PREDICTED_ROLES);
    enhanced.confidence = enhanced.confidence.clamp(0.0, 1.0);
    enhanced.method = AnalysisMethod::Enhanced;
    enhanced.needs_enhancement = false;
    enhanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use async_trait::async_trait;

    fn analyzer() -> TextAnalyzer {
        TextAnalyzer::default()
    }

    struct FixedClassifier;

    #[async_trait]
    impl EnhancedClassifier for FixedClassifier {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn classify(&self, _text: &str) -> Result<AnalysisResult, AppError> {
            let mut result = AnalysisResult::empty("ignored");
            result.predicted_roles = vec![
                "Canine Care Specialist".to_string(),
                "Pet Sitter".to_string(),
                "Kennel Assistant".to_string(),
                "Groomer".to_string(),
            ];
            result.confidence = 1.4;
            Ok(result)
        }
    }

    struct BrokenClassifier;

    #[async_trait]
    impl EnhancedClassifier for BrokenClassifier {
        fn name(&self) -> &str {
            "broken"
        }

        async fn classify(&self, _text: &str) -> Result<AnalysisResult, AppError> {
            Err(AppError::Internal(anyhow::anyhow!("model offline")))
        }
    }

    #[tokio::test]
    async fn test_exact_trigger_keyword_predicts_role() {
        let result = analyzer().analyze("I am a nurse").await;
        assert_eq!(result.predicted_roles.first().map(String::as_str), Some("Nurse"));
        assert!(result.confidence >= 0.7, "got {}", result.confidence);
        assert_eq!(result.method, AnalysisMethod::PatternMatching);
        assert!(!result.needs_enhancement);
    }

    #[tokio::test]
    async fn test_fallback_extracts_dog_walker() {
        let result = analyzer()
            .analyze("Looking for a part time dog walker job")
            .await;
        assert_eq!(result.predicted_roles, vec!["Dog Walker".to_string()]);
        assert_eq!(result.method, AnalysisMethod::FallbackPatterns);
        assert!((result.confidence - 0.6).abs() < f32::EPSILON);
        assert!(result.preferences.part_time);
        assert!(result.needs_enhancement);
    }

    #[tokio::test]
    async fn test_punctuation_only_yields_general_position() {
        let result = analyzer().analyze("?!? ...").await;
        assert_eq!(result.predicted_roles, vec!["General Position".to_string()]);
        assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
    }

    #[tokio::test]
    async fn test_all_stop_words_yields_general_position() {
        let result = analyzer().analyze("looking for a job").await;
        assert_eq!(result.predicted_roles, vec!["General Position".to_string()]);
        assert_eq!(result.method, AnalysisMethod::FallbackPatterns);
    }

    #[tokio::test]
    async fn test_empty_input_has_no_roles_and_zero_confidence() {
        let result = analyzer().analyze("   ").await;
        assert!(result.predicted_roles.is_empty());
        assert_eq!(result.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_confidence_bounded_and_at_most_three_roles() {
        let queries = [
            "senior software engineer developer with machine learning and data science, \
             nurse, teacher, graphic design, sales, marketing, accounting",
            "python",
            "hello there",
            "work",
            "remote frontend backend full stack developer programmer coding",
        ];
        for q in queries {
            let result = analyzer().analyze(q).await;
            assert!(
                (0.0..=1.0).contains(&result.confidence),
                "{q}: {}",
                result.confidence
            );
            assert!(result.predicted_roles.len() <= 3, "{q}");
        }
    }

    #[test]
    fn test_confidence_grows_with_matches_and_caps() {
        assert!((role_confidence(1) - 0.7).abs() < f32::EPSILON);
        assert!((role_confidence(2) - 0.9).abs() < f32::EPSILON);
        assert!((role_confidence(6) - 0.9).abs() < f32::EPSILON);
        assert!(role_confidence(1) < role_confidence(2));
    }

    #[test]
    fn test_one_match_lands_exactly_on_threshold() {
        assert!(role_confidence(1) >= CONFIDENCE_THRESHOLD);
    }

    #[test]
    fn test_roles_sorted_by_confidence_descending() {
        let result = analyzer()
            .analyze_patterns("nurse or backend developer doing full stack coding");
        assert_eq!(result.predicted_roles[0], "Software Developer");
        assert!(result.predicted_roles.contains(&"Nurse".to_string()));
        let confidences: Vec<f32> = result.role_matches.iter().map(|m| m.confidence).collect();
        assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_matched_keywords_recorded() {
        let result = analyzer().analyze_patterns("registered nurse in patient care");
        let nurse = &result.role_matches[0];
        assert!(nurse.matched_keywords.contains("nurse"));
        assert!(nurse.matched_keywords.contains("registered nurse"));
        assert!(nurse.matched_keywords.contains("patient care"));
        assert!((nurse.confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_skills_title_cased_in_registry_order() {
        let result = analyzer().analyze_patterns("I know SQL, Docker and Python");
        assert_eq!(result.skills, vec!["Python", "Sql", "Docker"]);
        assert!((result.confidence - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn test_generic_job_word_confidence() {
        let result = analyzer().analyze_patterns("any career change ideas");
        assert!((result.confidence - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_no_signal_defaults_to_half_confidence() {
        let result = analyzer().analyze_patterns("hello there");
        assert!((result.confidence - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_preferences_detected_independently() {
        let prefs = analyzer()
            .analyze_patterns("Senior freelance contract role, WFH, part-time, new grad welcome")
            .preferences;
        assert!(prefs.remote);
        assert!(prefs.part_time);
        assert!(prefs.freelance);
        assert!(prefs.senior);
        assert!(prefs.junior);

        let none = analyzer().analyze_patterns("nurse").preferences;
        assert_eq!(none, WorkPreferences::default());
    }

    #[tokio::test]
    async fn test_enhancer_used_when_confidence_low() {
        let analyzer = analyzer().with_enhancer(Arc::new(FixedClassifier));
        let result = analyzer.analyze("dog walker wanted").await;
        assert_eq!(result.method, AnalysisMethod::Enhanced);
        assert_eq!(result.predicted_roles.len(), 3);
        assert_eq!(result.predicted_roles[0], "Canine Care Specialist");
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.query, "dog walker wanted");
    }

    #[tokio::test]
    async fn test_query_echoed_untrimmed() {
        let raw = "  dog walker wanted \n";
        let result = analyzer().analyze(raw).await;
        assert_eq!(result.query, raw);
        assert_eq!(result.predicted_roles, vec!["Dog Walker".to_string()]);

        let enhanced = analyzer()
            .with_enhancer(Arc::new(FixedClassifier))
            .analyze(raw)
            .await;
        assert_eq!(enhanced.query, raw);
    }

    #[tokio::test]
    async fn test_enhancer_skipped_when_confident() {
        let analyzer = analyzer().with_enhancer(Arc::new(FixedClassifier));
        let result = analyzer.analyze("nurse").await;
        assert_eq!(result.method, AnalysisMethod::PatternMatching);
        assert_eq!(result.predicted_roles, vec!["Nurse".to_string()]);
    }

    #[tokio::test]
    async fn test_failing_enhancer_falls_back_to_heuristic() {
        let analyzer = analyzer().with_enhancer(Arc::new(BrokenClassifier));
        let result = analyzer.analyze("dog walker wanted").await;
        assert_eq!(result.method, AnalysisMethod::FallbackPatterns);
        assert_eq!(result.predicted_roles, vec!["Dog Walker".to_string()]);
    }

    #[tokio::test]
    async fn test_custom_rules_replace_registry() {
        let rules = ClassifierRules::from_json_str(
            r#"{
                "roles": [{"name": "Dog Walker", "keywords": ["dog walker", "dog walking"]}],
                "skills": [],
                "stop_words": []
            }"#,
        )
        .unwrap();
        let result = TextAnalyzer::new(rules).analyze("part time dog walker").await;
        assert_eq!(result.method, AnalysisMethod::PatternMatching);
        assert_eq!(result.predicted_roles, vec!["Dog Walker".to_string()]);
    }

    #[test]
    fn test_search_keywords_include_arrangements() {
        let mut result = analyzer().analyze_patterns("remote part-time developer");
        assert_eq!(result.search_keywords(), "Software Developer remote part-time");

        result.predicted_roles.clear();
        assert_eq!(result.search_keywords(), "remote part-time developer remote part-time");

        let empty = AnalysisResult::empty("");
        assert_eq!(empty.search_keywords(), DEFAULT_SEARCH_KEYWORDS);
    }

    #[test]
    fn test_method_serializes_snake_case() {
        let json = serde_json::to_string(&AnalysisMethod::FallbackPatterns).unwrap();
        assert_eq!(json, r#""fallback_patterns""#);
    }
}
