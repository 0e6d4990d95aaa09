use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;
use crate::models::domain::{Candidate, ResumeCandidate};

/// Request to rank candidates against a job description
///
/// Empty lists and an empty job description are valid and simply score low.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidatesRequest {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(alias = "job_description", rename = "jobDescription", default)]
    pub job_description: String,
    #[serde(alias = "required_skills", rename = "requiredSkills", default)]
    pub required_skills: Vec<String>,
    /// Partial matching options, applied over the configured defaults
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(alias = "tenant_id", rename = "tenantId", default)]
    pub tenant_id: Option<String>,
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
}

/// Request to rank resumes by embedding similarity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TalentMatchRequest {
    pub candidates: Vec<ResumeCandidate>,
    #[validate(length(min = 1))]
    #[serde(alias = "job_description", rename = "jobDescription")]
    pub job_description: String,
    #[serde(alias = "tenant_id", rename = "tenantId", default)]
    pub tenant_id: Option<String>,
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
}

/// Request to answer a question using the most relevant document as context
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RagQueryRequest {
    #[validate(length(min = 1))]
    pub query: String,
    #[validate(length(min = 1))]
    pub documents: Vec<String>,
    #[serde(alias = "tenant_id", rename = "tenantId", default)]
    pub tenant_id: Option<String>,
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
}
