use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Candidate profile supplied by the caller for a single ranking request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Years of experience
    #[serde(default)]
    pub experience: f64,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub match_score: Option<f64>,
}

impl Candidate {
    /// Free-text profile compared against the job description: skills, then education
    pub fn profile_text(&self) -> String {
        format!("{} {}", self.skills.join(" "), self.education)
    }

    /// Helper to get match_score as a number, defaulting to 0
    pub fn score(&self) -> f64 {
        self.match_score.unwrap_or(0.0)
    }

    /// Consume the candidate and return it with the computed score attached
    pub fn with_match_score(self, score: f64) -> Self {
        Self {
            match_score: Some(score),
            ..self
        }
    }
}

/// Ranking options for one request
///
/// Every field has a default so callers can send partial option objects.
/// Weights are not required to sum to 1 and are not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchingConfig {
    pub matching_model: String,
    pub weight_skills: f64,
    pub weight_experience: f64,
    pub weight_education: f64,
    pub threshold: f64,
    pub include_partial_matches: bool,
    /// Composite scores below this value (0-100 scale) are dropped
    pub min_match_score: f64,
    pub use_compliance_verification: bool,
    pub prioritize_cultural_fit: bool,
    pub use_semantic_matching: bool,
    #[serde(rename = "useRAG")]
    pub use_rag: bool,
    pub use_skill_based_filtering: bool,
    pub target_sources: Option<Vec<String>>,
    pub model: Option<String>,
    /// Result cap; `None` or a non-positive value means no cap
    #[serde(deserialize_with = "deserialize_top_n")]
    pub top_n: Option<i64>,
}

/// Accept `5` and `5.0` alike; fractional caps are rejected
fn deserialize_top_n<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<Number>::deserialize(deserializer)? {
        Some(number) => number,
        None => return Ok(None),
    };

    if let Some(n) = number.as_i64() {
        return Ok(Some(n));
    }
    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(Some(f as i64)),
        _ => Err(D::Error::custom(format!("topN must be a whole number, got {}", number))),
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            matching_model: "hybrid".to_string(),
            weight_skills: 0.5,
            weight_experience: 0.3,
            weight_education: 0.2,
            threshold: 0.6,
            include_partial_matches: true,
            min_match_score: 0.0,
            use_compliance_verification: false,
            prioritize_cultural_fit: false,
            use_semantic_matching: true,
            use_rag: false,
            use_skill_based_filtering: true,
            target_sources: None,
            model: None,
            top_n: Some(10),
        }
    }
}

impl MatchingConfig {
    /// Number of results to keep, if a positive cap is set
    pub fn result_cap(&self) -> Option<usize> {
        match self.top_n {
            Some(n) if n > 0 => Some(usize::try_from(n).unwrap_or(usize::MAX)),
            _ => None,
        }
    }

    /// Apply a partial JSON options object on top of these values
    ///
    /// Keys present in `overrides` replace the corresponding fields; an explicit
    /// `null` clears optional fields (e.g. `"topN": null` removes the cap).
    pub fn overlay(&self, overrides: &Value) -> Result<Self, serde_json::Error> {
        let patch = match overrides {
            Value::Null => return Ok(self.clone()),
            Value::Object(patch) => patch,
            other => return serde_json::from_value(other.clone()),
        };

        let mut merged = match serde_json::to_value(self)? {
            Value::Object(base) => base,
            _ => Map::new(),
        };
        for (key, value) in patch {
            merged.insert(key.clone(), value.clone());
        }

        serde_json::from_value(Value::Object(merged))
    }
}

/// Candidate for the embedding-based talent match
///
/// Only `resumeText` is interpreted; every other field is echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeCandidate {
    #[serde(rename = "resumeText")]
    pub resume_text: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Resume candidate with its embedding similarity to the job description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeMatch {
    #[serde(flatten)]
    pub candidate: ResumeCandidate,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
}
