use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use crate::models::{HealthResponse, MatchCandidatesRequest, MatchCandidatesResponse};
use crate::routes::{error_response, AppState};
use crate::services::audit::{record_or_warn, AuditEvent, AuditStatus, CANDIDATE_MATCH};

/// Configure health and ranking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matching/candidates", web::post().to(match_candidates));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        similarity_backend: state.matcher.similarity_backend().to_string(),
    })
}

/// Rank candidates endpoint
///
/// POST /api/v1/matching/candidates
///
/// Request body:
/// ```json
/// {
///   "candidates": [{"id": "string", "name": "string", "skills": ["string"], "experience": 5,
///                   "education": "string", "location": "string", "source": "string"}],
///   "jobDescription": "string",
///   "requiredSkills": ["string"],
///   "options": {"weightSkills": 0.5, "minMatchScore": 50, "topN": 10},
///   "tenantId": "string",
///   "userId": "string"
/// }
/// ```
async fn match_candidates(
    state: web::Data<AppState>,
    req: web::Json<MatchCandidatesRequest>,
) -> impl Responder {
    let req = req.into_inner();
    let tenant_id = req.tenant_id.as_deref();
    let user_id = req.user_id.as_deref();

    let config = match req.options.as_ref() {
        Some(overrides) => match state.defaults.overlay(overrides) {
            Ok(config) => config,
            Err(e) => {
                tracing::info!("Rejected matching options: {}", e);
                record_or_warn(
                    state.audit.as_ref(),
                    AuditEvent::new(CANDIDATE_MATCH, tenant_id, user_id, AuditStatus::Failure),
                );
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "Invalid matching options",
                    e.to_string(),
                );
            }
        },
        None => state.defaults.clone(),
    };

    tracing::info!(
        "Ranking {} candidates against {} required skills (model: {})",
        req.candidates.len(),
        req.required_skills.len(),
        config.matching_model
    );

    let result = state.matcher.rank(
        req.candidates,
        &req.job_description,
        &req.required_skills,
        &config,
    );

    tracing::info!(
        "Returning {} candidates (from {} considered)",
        result.candidates.len(),
        result.total_candidates
    );

    record_or_warn(
        state.audit.as_ref(),
        AuditEvent::new(CANDIDATE_MATCH, tenant_id, user_id, AuditStatus::Success),
    );

    HttpResponse::Ok().json(MatchCandidatesResponse {
        returned: result.candidates.len(),
        total_candidates: result.total_candidates,
        candidates: result.candidates,
    })
}
