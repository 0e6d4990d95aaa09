use serde::{Deserialize, Serialize};
use crate::models::domain::{Candidate, ResumeMatch};

/// Response for the candidate ranking endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidatesResponse {
    pub candidates: Vec<Candidate>,
    /// Candidates considered after the source allow-list
    pub total_candidates: usize,
    pub returned: usize,
}

/// Response for the embedding talent match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentMatchResponse {
    pub results: Vec<ResumeMatch>,
}

/// Response for the RAG query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagQueryResponse {
    pub answer: String,
    pub context: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub similarity_backend: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
