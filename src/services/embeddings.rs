use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::EmbeddingSettings;
use crate::services::cache::EmbeddingCache;

/// Errors that can occur when calling the embedding or chat completion API
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Chat message for the completion API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Client for an OpenAI-compatible embedding and chat completion API
///
/// Handles:
/// - Text embeddings (`POST /embeddings`), cached per model and text
/// - Chat completions (`POST /chat/completions`)
pub struct EmbeddingClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    chat_model: String,
    client: Client,
    cache: EmbeddingCache,
}

impl EmbeddingClient {
    /// Create a new client
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model: String,
        chat_model: String,
        timeout: Duration,
        cache: EmbeddingCache,
    ) -> Result<Self, EmbeddingError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            model,
            chat_model,
            client,
            cache,
        })
    }

    /// Create a client from the `embedding` configuration section
    pub fn from_settings(
        settings: &EmbeddingSettings,
        cache: EmbeddingCache,
    ) -> Result<Self, EmbeddingError> {
        Self::new(
            settings.base_url.clone(),
            settings.api_key.clone(),
            settings.model.clone(),
            settings.chat_model.clone(),
            Duration::from_secs(settings.timeout_secs),
            cache,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.client.post(self.url(path));
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Embed a text, using the cache when possible
    pub async fn embed(&self, text: &str) -> Result<Arc<Vec<f64>>, EmbeddingError> {
        if let Some(cached) = self.cache.get(&self.model, text).await {
            return Ok(cached);
        }

        tracing::debug!("Requesting embedding ({} chars) from model {}", text.len(), self.model);

        let response = self
            .post("embeddings")
            .json(&EmbeddingRequest {
                input: text,
                model: &self.model,
            })
            .send()
            .await?;

        let parsed: EmbeddingResponse = parse_response(response, "embedding").await?;
        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|data| Arc::new(data.embedding))
            .ok_or_else(|| EmbeddingError::InvalidResponse("Missing data[0].embedding".into()))?;

        self.cache.insert(&self.model, text, embedding.clone()).await;
        Ok(embedding)
    }

    /// Run a chat completion and return the first choice's content
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, EmbeddingError> {
        tracing::debug!("Requesting chat completion from model {}", self.chat_model);

        let response = self
            .post("chat/completions")
            .json(&ChatCompletionRequest {
                model: &self.chat_model,
                messages,
            })
            .send()
            .await?;

        let parsed: ChatCompletionResponse = parse_response(response, "chat completion").await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| EmbeddingError::InvalidResponse("Missing choices[0].message".into()))
    }
}

async fn parse_response<T>(response: reqwest::Response, what: &str) -> Result<T, EmbeddingError>
where
    T: for<'de> Deserialize<'de>,
{
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(EmbeddingError::Unauthorized);
    }

    let body = response.text().await?;
    if !status.is_success() {
        return Err(EmbeddingError::ApiError(format!(
            "Failed to fetch {}: {} {}",
            what, status, body
        )));
    }

    serde_json::from_str(&body).map_err(|e| {
        EmbeddingError::InvalidResponse(format!("Failed to parse {} response: {}", what, e))
    })
}
