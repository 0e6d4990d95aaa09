use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::core::{
    filters::{matches_target_sources, meets_min_score},
    scoring::calculate_match_score,
    similarity::{SimilarityBackend, SimilarityProvider},
};
use crate::models::{Candidate, MatchingConfig};

/// Candidate count at which scoring moves onto the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Result of the ranking process
#[derive(Debug)]
pub struct MatchResult {
    pub candidates: Vec<Candidate>,
    /// Candidates considered after the source allow-list
    pub total_candidates: usize,
}

/// Candidate ranking engine
///
/// # Pipeline Stages
/// 1. Source allow-list pre-filter
/// 2. Composite scoring (skills, semantic, experience)
/// 3. Minimum score filter
/// 4. Stable sort by score and top-N truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    similarity: Arc<dyn SimilarityProvider>,
    parallel_threshold: usize,
}

impl Matcher {
    pub fn new(similarity: Arc<dyn SimilarityProvider>) -> Self {
        Self {
            similarity,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_backend(backend: SimilarityBackend) -> Self {
        Self::new(backend.provider())
    }

    /// Score on the rayon pool once a request has at least `threshold` candidates;
    /// 0 keeps scoring on the calling thread
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Name of the injected similarity backend
    pub fn similarity_backend(&self) -> &'static str {
        self.similarity.name()
    }

    /// Rank candidates for a job description
    ///
    /// Consumes the candidates and returns new values with `match_score` set.
    /// Ties keep their input order.
    ///
    /// # Arguments
    /// * `candidates` - Candidates in input order
    /// * `job_description` - Free-text job description
    /// * `required_skills` - Skills the role requires
    /// * `config` - Weights, flags, minimum score and result cap
    ///
    /// # Returns
    /// MatchResult containing the ranked candidates
    pub fn rank(
        &self,
        candidates: Vec<Candidate>,
        job_description: &str,
        required_skills: &[String],
        config: &MatchingConfig,
    ) -> MatchResult {
        // Stage 1: Source allow-list
        let eligible: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| matches_target_sources(candidate, config))
            .collect();
        let total_candidates = eligible.len();

        // Stage 2: Score every candidate independently
        let similarity = self.similarity.as_ref();
        let score = |candidate: &Candidate| {
            calculate_match_score(candidate, job_description, required_skills, config, similarity)
        };
        let scores: Vec<f64> =
            if self.parallel_threshold > 0 && eligible.len() >= self.parallel_threshold {
                eligible.par_iter().map(score).collect()
            } else {
                eligible.iter().map(score).collect()
            };

        // Stage 3: Minimum score
        let mut ranked: Vec<Candidate> = eligible
            .into_iter()
            .zip(scores)
            .filter(|(_, score)| meets_min_score(*score, config))
            .map(|(candidate, score)| candidate.with_match_score(score))
            .collect();

        // Stage 4: Stable sort by score (descending), then cap
        ranked.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));

        if let Some(cap) = config.result_cap() {
            ranked.truncate(cap);
        }

        tracing::debug!(
            "Ranked {} of {} candidates with {} similarity",
            ranked.len(),
            total_candidates,
            self.similarity.name()
        );

        MatchResult {
            candidates: ranked,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_backend(SimilarityBackend::default())
    }
}
