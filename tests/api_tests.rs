// HTTP handler tests for Talent Match

use actix_web::{test, web, App};
use mockito::Matcher as BodyMatcher;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use talent_match::core::{Matcher, SimilarityBackend};
use talent_match::models::MatchingConfig;
use talent_match::routes::{self, AppState};
use talent_match::services::{AuditStatus, EmbeddingCache, EmbeddingClient, MemoryAuditSink};

fn create_state(embedding_url: String, audit: Arc<MemoryAuditSink>) -> AppState {
    let embeddings = EmbeddingClient::new(
        embedding_url,
        Some("test-key".to_string()),
        "test-embedding".to_string(),
        "test-chat".to_string(),
        Duration::from_secs(5),
        EmbeddingCache::new(100, 60),
    )
    .unwrap();

    AppState {
        matcher: Matcher::with_backend(SimilarityBackend::Overlap),
        defaults: MatchingConfig::default(),
        embeddings: Arc::new(embeddings),
        audit,
    }
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(routes::json_config(64 * 1024))
                .configure(routes::configure_routes),
        )
        .await
    };
}

fn ranking_body(options: Value) -> Value {
    json!({
        "candidates": [
            {"id": "1", "name": "Ada", "skills": ["python"], "experience": 2,
             "education": "BS", "location": "Berlin", "source": "internal"},
            {"id": "2", "name": "Grace", "skills": ["python", "aws", "docker"], "experience": 8,
             "education": "MS", "location": "Remote", "source": "linkedin"},
            {"id": "3", "name": "Linus", "skills": ["c"], "experience": 15,
             "education": "", "location": "Portland", "source": "internal"}
        ],
        "jobDescription": "python aws docker engineer",
        "requiredSkills": ["python", "aws", "docker"],
        "options": options,
        "tenantId": "tenant-1",
        "userId": "user-1"
    })
}

#[actix_web::test]
async fn test_health() {
    let audit = Arc::new(MemoryAuditSink::new());
    let app = init_app!(create_state("http://127.0.0.1:9".to_string(), audit));

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["similarity_backend"], "overlap");
}

#[actix_web::test]
async fn test_match_candidates_ranks_and_audits() {
    let audit = Arc::new(MemoryAuditSink::new());
    let app = init_app!(create_state("http://127.0.0.1:9".to_string(), audit.clone()));

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/candidates")
        .set_json(ranking_body(json!({ "minMatchScore": 30, "topN": 2 })))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_candidates"], 3);
    assert_eq!(body["returned"], 2);
    assert_eq!(body["candidates"][0]["id"], "2");
    assert_eq!(body["candidates"][0]["name"], "Grace");
    assert!(body["candidates"][0]["match_score"].as_f64().unwrap() >= 30.0);

    let events = audit.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "candidateMatch");
    assert_eq!(events[0].tenant_id.as_deref(), Some("tenant-1"));
    assert_eq!(events[0].status, AuditStatus::Success);
}

#[actix_web::test]
async fn test_match_candidates_without_options_uses_defaults() {
    let audit = Arc::new(MemoryAuditSink::new());
    let app = init_app!(create_state("http://127.0.0.1:9".to_string(), audit));

    let mut body = ranking_body(Value::Null);
    body.as_object_mut().unwrap().remove("options");

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/candidates")
        .set_json(body)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["returned"], 3);
}

#[actix_web::test]
async fn test_match_candidates_empty_request() {
    let audit = Arc::new(MemoryAuditSink::new());
    let app = init_app!(create_state("http://127.0.0.1:9".to_string(), audit));

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/candidates")
        .set_json(json!({}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["candidates"], json!([]));
    assert_eq!(body["total_candidates"], 0);
}

#[actix_web::test]
async fn test_match_candidates_rejects_bad_options() {
    let audit = Arc::new(MemoryAuditSink::new());
    let app = init_app!(create_state("http://127.0.0.1:9".to_string(), audit.clone()));

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/candidates")
        .set_json(ranking_body(json!({ "weightSkills": "lots" })))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status_code"], 400);
    assert_eq!(audit.events()[0].status, AuditStatus::Failure);
}

#[actix_web::test]
async fn test_invalid_json_body() {
    let audit = Arc::new(MemoryAuditSink::new());
    let app = init_app!(create_state("http://127.0.0.1:9".to_string(), audit));

    let req = test::TestRequest::post()
        .uri("/api/v1/matching/candidates")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_talent_match_with_embedding_service() {
    let mut server = mockito::Server::new_async().await;
    for (input, embedding) in [
        ("Rust backend role", json!([1.0, 0.0])),
        ("Rust and Tokio services", json!([0.9, 0.1])),
        ("Watercolor painting", json!([0.0, 1.0])),
    ] {
        server
            .mock("POST", "/embeddings")
            .match_body(BodyMatcher::PartialJson(json!({ "input": input })))
            .with_status(200)
            .with_body(json!({ "data": [{ "embedding": embedding }] }).to_string())
            .create_async()
            .await;
    }

    let audit = Arc::new(MemoryAuditSink::new());
    let app = init_app!(create_state(server.url(), audit.clone()));

    let req = test::TestRequest::post()
        .uri("/api/v1/talent/match")
        .set_json(json!({
            "candidates": [
                {"id": "artist", "resumeText": "Watercolor painting"},
                {"id": "dev", "resumeText": "Rust and Tokio services", "location": "Oslo"}
            ],
            "jobDescription": "Rust backend role",
            "tenantId": "t"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id"], "dev");
    assert_eq!(results[0]["location"], "Oslo");
    assert!(results[0]["matchScore"].as_f64().unwrap() > results[1]["matchScore"].as_f64().unwrap());
    assert_eq!(audit.events()[0].event, "talentMatch");
}

#[actix_web::test]
async fn test_talent_match_upstream_failure_is_bad_gateway() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/embeddings")
        .with_status(500)
        .with_body("unavailable")
        .create_async()
        .await;

    let audit = Arc::new(MemoryAuditSink::new());
    let app = init_app!(create_state(server.url(), audit.clone()));

    let req = test::TestRequest::post()
        .uri("/api/v1/talent/match")
        .set_json(json!({
            "candidates": [{"id": "1", "resumeText": "anything"}],
            "jobDescription": "Rust backend role"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 502);
    assert_eq!(audit.events()[0].status, AuditStatus::Failure);
}

#[actix_web::test]
async fn test_rag_query_validation() {
    let audit = Arc::new(MemoryAuditSink::new());
    let app = init_app!(create_state("http://127.0.0.1:9".to_string(), audit.clone()));

    let req = test::TestRequest::post()
        .uri("/api/v1/rag/query")
        .set_json(json!({ "query": "notice period?", "documents": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(audit.events()[0].event, "ragPipeline");
}

#[actix_web::test]
async fn test_rag_query_answers_with_context() {
    let mut server = mockito::Server::new_async().await;
    for (input, embedding) in [
        ("How long is the probation?", json!([0.0, 1.0])),
        ("Probation lasts six months.", json!([0.1, 0.9])),
        ("Parking is free.", json!([1.0, 0.0])),
    ] {
        server
            .mock("POST", "/embeddings")
            .match_body(BodyMatcher::PartialJson(json!({ "input": input })))
            .with_status(200)
            .with_body(json!({ "data": [{ "embedding": embedding }] }).to_string())
            .create_async()
            .await;
    }
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Six months."}}]}"#)
        .create_async()
        .await;

    let audit = Arc::new(MemoryAuditSink::new());
    let app = init_app!(create_state(server.url(), audit));

    let req = test::TestRequest::post()
        .uri("/api/v1/rag/query")
        .set_json(json!({
            "query": "How long is the probation?",
            "documents": ["Parking is free.", "Probation lasts six months."]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["answer"], "Six months.");
    assert_eq!(body["context"], "Probation lasts six months.");
}
