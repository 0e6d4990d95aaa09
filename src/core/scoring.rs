use crate::core::similarity::{skill_similarity_or_overlap, text_similarity_or_overlap, SimilarityProvider};
use crate::models::{Candidate, MatchingConfig};

/// Fixed weight of the semantic signal, independent of the configured weights
pub const SEMANTIC_WEIGHT: f64 = 0.3;

/// Years of experience that earn the full experience score
pub const FULL_EXPERIENCE_YEARS: f64 = 10.0;

/// Calculate the composite match score (0-100) of a candidate for a job
///
/// Scoring formula:
/// score = (
///     skills_score * weight_skills +     # if skill-based filtering is on
///     semantic_score * 0.3 +             # if semantic matching is on
///     experience_score * weight_experience
/// ) / (sum of the weights that took part) * 100
///
/// A zero weight sum gives a score of 0.
pub fn calculate_match_score(
    candidate: &Candidate,
    job_description: &str,
    required_skills: &[String],
    config: &MatchingConfig,
    similarity: &dyn SimilarityProvider,
) -> f64 {
    let mut total_score = 0.0;
    let mut weight_sum = 0.0;

    // Lexical skill overlap
    if config.use_skill_based_filtering {
        let skill_score = skill_similarity_or_overlap(similarity, &candidate.skills, required_skills);
        total_score += skill_score * config.weight_skills;
        weight_sum += config.weight_skills;
    }

    // Semantic similarity of the profile text
    if config.use_semantic_matching {
        let semantic_score =
            text_similarity_or_overlap(similarity, &candidate.profile_text(), job_description);
        total_score += semantic_score * SEMANTIC_WEIGHT;
        weight_sum += SEMANTIC_WEIGHT;
    }

    // Experience always contributes
    total_score += experience_score(candidate.experience) * config.weight_experience;
    weight_sum += config.weight_experience;

    normalize_score(total_score, weight_sum)
}

/// Calculate experience score (0-1)
/// Linear in years, capped at `FULL_EXPERIENCE_YEARS`
#[inline]
pub fn experience_score(years: f64) -> f64 {
    (years / FULL_EXPERIENCE_YEARS).min(1.0)
}

/// Weighted average scaled to 0-100; 0 when no weight took part
#[inline]
fn normalize_score(total_score: f64, weight_sum: f64) -> f64 {
    if weight_sum > 0.0 {
        (total_score / weight_sum) * 100.0
    } else {
        0.0
    }
}
