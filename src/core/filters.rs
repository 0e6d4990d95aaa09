use crate::models::{Candidate, MatchingConfig};

/// Check if a candidate comes from one of the configured target sources
///
/// An absent or empty allow-list accepts every source.
#[inline]
pub fn matches_target_sources(candidate: &Candidate, config: &MatchingConfig) -> bool {
    match config.target_sources.as_deref() {
        None | Some([]) => true,
        Some(sources) => sources.iter().any(|source| *source == candidate.source),
    }
}

/// Check if a composite score clears the configured minimum
#[inline]
pub fn meets_min_score(score: f64, config: &MatchingConfig) -> bool {
    score >= config.min_match_score
}
