//! Talent Match - candidate ranking service for recruiting
//!
//! This library provides the ranking engine that scores candidates against a job
//! description by blending skill similarity, semantic text similarity and
//! experience, plus the HTTP handlers and embedding-backed workflows around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, MatchResult, SimilarityBackend, SimilarityProvider};
pub use models::{Candidate, MatchingConfig, MatchCandidatesRequest, MatchCandidatesResponse};
