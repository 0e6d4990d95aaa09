// Core algorithm exports
pub mod cosine;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod similarity;
pub mod tfidf;

pub use cosine::{cosine_similarity, most_similar};
pub use filters::{matches_target_sources, meets_min_score};
pub use matcher::{Matcher, MatchResult};
pub use scoring::calculate_match_score;
pub use similarity::{OverlapSimilarity, SimilarityBackend, SimilarityError, SimilarityProvider, TfIdfSimilarity};
pub use tfidf::{TfIdfError, TfIdfMatrix};
