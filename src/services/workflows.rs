use std::cmp::Ordering;
use thiserror::Error;

use crate::core::cosine::{cosine_similarity, most_similar};
use crate::models::{ResumeCandidate, ResumeMatch};
use crate::services::embeddings::{ChatMessage, EmbeddingClient, EmbeddingError};

/// System prompt for retrieval-augmented answers
pub const RAG_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Errors from the embedding-backed workflows
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("No documents to select context from")]
    NoDocuments,

    #[error(transparent)]
    Upstream(#[from] EmbeddingError),
}

/// Answer produced by the RAG workflow
#[derive(Debug, Clone, PartialEq)]
pub struct RagAnswer {
    pub answer: String,
    pub context: String,
}

/// Rank resumes by embedding similarity to the job description
///
/// The job description is embedded once; each candidate's resume text is
/// embedded and compared by cosine similarity. Ties keep input order.
pub async fn match_resumes(
    client: &EmbeddingClient,
    job_description: &str,
    candidates: Vec<ResumeCandidate>,
) -> Result<Vec<ResumeMatch>, WorkflowError> {
    let job_embedding = client.embed(job_description).await?;

    let mut results = Vec::with_capacity(candidates.len());
    for mut candidate in candidates {
        let resume_embedding = client.embed(&candidate.resume_text).await?;
        let match_score = cosine_similarity(&job_embedding, &resume_embedding);
        candidate.fields.remove("matchScore");
        results.push(ResumeMatch {
            candidate,
            match_score,
        });
    }

    results.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });

    Ok(results)
}

/// Answer `query` using the most similar document as context
pub async fn answer_with_context(
    client: &EmbeddingClient,
    query: &str,
    documents: &[String],
) -> Result<RagAnswer, WorkflowError> {
    if documents.is_empty() {
        return Err(WorkflowError::NoDocuments);
    }

    let query_embedding = client.embed(query).await?;
    let mut document_embeddings = Vec::with_capacity(documents.len());
    for document in documents {
        document_embeddings.push(client.embed(document).await?);
    }

    let document_vectors: Vec<&[f64]> = document_embeddings.iter().map(|e| e.as_slice()).collect();
    let (best_idx, best_score) = most_similar(&query_embedding, &document_vectors)
        .ok_or(WorkflowError::NoDocuments)?;
    let context = documents[best_idx].clone();

    tracing::debug!("Selected document {} as context (similarity {:.3})", best_idx, best_score);

    let messages = [
        ChatMessage::system(RAG_SYSTEM_PROMPT),
        ChatMessage::user(format!("Context: {}\n\nQuestion: {}", context, query)),
    ];
    let answer = client.complete(&messages).await?;

    Ok(RagAnswer { answer, context })
}
