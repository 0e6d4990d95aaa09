use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{RagQueryRequest, RagQueryResponse, TalentMatchRequest, TalentMatchResponse};
use crate::routes::{error_response, AppState};
use crate::services::audit::{record_or_warn, AuditEvent, AuditStatus, RAG_PIPELINE, TALENT_MATCH};
use crate::services::workflows::{answer_with_context, match_resumes, WorkflowError};

/// Configure embedding-backed workflow routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/talent/match", web::post().to(talent_match))
        .route("/rag/query", web::post().to(rag_query));
}

fn workflow_error_response(err: &WorkflowError) -> HttpResponse {
    match err {
        WorkflowError::NoDocuments => {
            error_response(StatusCode::BAD_REQUEST, "Validation failed", err.to_string())
        }
        WorkflowError::Upstream(e) => {
            error_response(StatusCode::BAD_GATEWAY, "Embedding service error", e.to_string())
        }
    }
}

/// Embedding talent match endpoint
///
/// POST /api/v1/talent/match
///
/// Request body:
/// ```json
/// {
///   "candidates": [{"id": "string", "resumeText": "string"}],
///   "jobDescription": "string",
///   "tenantId": "string",
///   "userId": "string"
/// }
/// ```
async fn talent_match(
    state: web::Data<AppState>,
    req: web::Json<TalentMatchRequest>,
) -> impl Responder {
    let req = req.into_inner();
    let audit = |status| {
        record_or_warn(
            state.audit.as_ref(),
            AuditEvent::new(TALENT_MATCH, req.tenant_id.as_deref(), req.user_id.as_deref(), status),
        )
    };

    if let Err(errors) = req.validate() {
        audit(AuditStatus::Failure);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    tracing::info!("Embedding talent match for {} candidates", req.candidates.len());

    match match_resumes(&state.embeddings, &req.job_description, req.candidates).await {
        Ok(results) => {
            audit(AuditStatus::Success);
            HttpResponse::Ok().json(TalentMatchResponse { results })
        }
        Err(e) => {
            tracing::error!("Talent match failed: {}", e);
            audit(AuditStatus::Failure);
            workflow_error_response(&e)
        }
    }
}

/// RAG query endpoint
///
/// POST /api/v1/rag/query
///
/// Request body:
/// ```json
/// {
///   "query": "string",
///   "documents": ["string"],
///   "tenantId": "string",
///   "userId": "string"
/// }
/// ```
async fn rag_query(
    state: web::Data<AppState>,
    req: web::Json<RagQueryRequest>,
) -> impl Responder {
    let req = req.into_inner();
    let audit = |status| {
        record_or_warn(
            state.audit.as_ref(),
            AuditEvent::new(RAG_PIPELINE, req.tenant_id.as_deref(), req.user_id.as_deref(), status),
        )
    };

    if let Err(errors) = req.validate() {
        audit(AuditStatus::Failure);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    tracing::info!("RAG query over {} documents", req.documents.len());

    match answer_with_context(&state.embeddings, &req.query, &req.documents).await {
        Ok(answer) => {
            audit(AuditStatus::Success);
            HttpResponse::Ok().json(RagQueryResponse {
                answer: answer.answer,
                context: answer.context,
            })
        }
        Err(e) => {
            tracing::error!("RAG query failed: {}", e);
            audit(AuditStatus::Failure);
            workflow_error_response(&e)
        }
    }
}
