// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, MatchingConfig, ResumeCandidate, ResumeMatch};
pub use requests::{MatchCandidatesRequest, RagQueryRequest, TalentMatchRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchCandidatesResponse, RagQueryResponse, TalentMatchResponse};
