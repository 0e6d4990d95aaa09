use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::core::tfidf::{pairwise_similarity, TfIdfError};

/// Errors a similarity provider may raise for a single comparison
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimilarityError {
    #[error("Vectorization failed: {0}")]
    Vectorization(#[from] TfIdfError),
}

/// Capability interface for the two similarity signals used in ranking
///
/// Both scores are in [0, 1]. Implementations must be pure functions of their
/// inputs.
pub trait SimilarityProvider: fmt::Debug + Send + Sync {
    /// Short backend name, reported by the health endpoint
    fn name(&self) -> &'static str;

    /// Similarity between a candidate's skills and the required skills
    fn skill_similarity(
        &self,
        candidate_skills: &[String],
        required_skills: &[String],
    ) -> Result<f64, SimilarityError>;

    /// Similarity between a candidate profile text and the job description
    fn text_similarity(&self, candidate_text: &str, job_text: &str) -> Result<f64, SimilarityError>;
}

/// Precise provider: TF-IDF vectors over the two-document corpus, cosine similarity
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfSimilarity;

impl SimilarityProvider for TfIdfSimilarity {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn skill_similarity(
        &self,
        candidate_skills: &[String],
        required_skills: &[String],
    ) -> Result<f64, SimilarityError> {
        if candidate_skills.is_empty() || required_skills.is_empty() {
            return Ok(0.0);
        }

        Ok(pairwise_similarity(
            &candidate_skills.join(" "),
            &required_skills.join(" "),
        )?)
    }

    fn text_similarity(&self, candidate_text: &str, job_text: &str) -> Result<f64, SimilarityError> {
        Ok(pairwise_similarity(candidate_text, job_text)?)
    }
}

/// Approximate provider: set overlap, never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapSimilarity;

impl OverlapSimilarity {
    /// `|candidate ∩ required| / |required|` over de-duplicated skill sets
    ///
    /// Missing required skills lower the score, extra candidate skills are ignored.
    /// Skills are compared exactly, including case.
    pub fn skill_overlap(&self, candidate_skills: &[String], required_skills: &[String]) -> f64 {
        if candidate_skills.is_empty() || required_skills.is_empty() {
            return 0.0;
        }

        let candidate: HashSet<&str> = candidate_skills.iter().map(String::as_str).collect();
        let required: HashSet<&str> = required_skills.iter().map(String::as_str).collect();

        let common = candidate.intersection(&required).count();
        common as f64 / required.len() as f64
    }

    /// `|candidate ∩ job| / min(|candidate|, |job|)` over lower-cased whitespace words
    pub fn word_overlap(&self, candidate_text: &str, job_text: &str) -> f64 {
        let candidate_text = candidate_text.to_lowercase();
        let job_text = job_text.to_lowercase();
        let candidate: HashSet<&str> = candidate_text.split_whitespace().collect();
        let job: HashSet<&str> = job_text.split_whitespace().collect();

        let smaller = candidate.len().min(job.len());
        if smaller == 0 {
            return 0.0;
        }

        let common = candidate.intersection(&job).count();
        common as f64 / smaller as f64
    }
}

impl SimilarityProvider for OverlapSimilarity {
    fn name(&self) -> &'static str {
        "overlap"
    }

    fn skill_similarity(
        &self,
        candidate_skills: &[String],
        required_skills: &[String],
    ) -> Result<f64, SimilarityError> {
        Ok(self.skill_overlap(candidate_skills, required_skills))
    }

    fn text_similarity(&self, candidate_text: &str, job_text: &str) -> Result<f64, SimilarityError> {
        Ok(self.word_overlap(candidate_text, job_text))
    }
}

/// Similarity backend, chosen once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityBackend {
    #[default]
    TfIdf,
    Overlap,
}

impl SimilarityBackend {
    /// Build the provider injected into the matcher
    pub fn provider(self) -> Arc<dyn SimilarityProvider> {
        match self {
            SimilarityBackend::TfIdf => Arc::new(TfIdfSimilarity),
            SimilarityBackend::Overlap => Arc::new(OverlapSimilarity),
        }
    }
}

impl fmt::Display for SimilarityBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityBackend::TfIdf => write!(f, "tfidf"),
            SimilarityBackend::Overlap => write!(f, "overlap"),
        }
    }
}

/// Skill similarity from `provider`, degrading to set overlap if it fails
pub fn skill_similarity_or_overlap(
    provider: &dyn SimilarityProvider,
    candidate_skills: &[String],
    required_skills: &[String],
) -> f64 {
    provider
        .skill_similarity(candidate_skills, required_skills)
        .unwrap_or_else(|e| {
            tracing::debug!("{} skill similarity failed, using overlap: {}", provider.name(), e);
            OverlapSimilarity.skill_overlap(candidate_skills, required_skills)
        })
}

/// Text similarity from `provider`, degrading to word overlap if it fails
pub fn text_similarity_or_overlap(
    provider: &dyn SimilarityProvider,
    candidate_text: &str,
    job_text: &str,
) -> f64 {
    provider
        .text_similarity(candidate_text, job_text)
        .unwrap_or_else(|e| {
            tracing::debug!("{} text similarity failed, using overlap: {}", provider.name(), e);
            OverlapSimilarity.word_overlap(candidate_text, job_text)
        })
}
