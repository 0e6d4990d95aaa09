use std::sync::Arc;
use std::time::Duration;

/// In-process embedding cache
///
/// Embeddings are keyed by model and input text. Entries expire after the
/// configured TTL and the cache is bounded by entry count.
#[derive(Clone)]
pub struct EmbeddingCache {
    entries: moka::future::Cache<String, Arc<Vec<f64>>>,
}

impl EmbeddingCache {
    /// Create a new cache
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries }
    }

    /// Get a cached embedding
    pub async fn get(&self, model: &str, text: &str) -> Option<Arc<Vec<f64>>> {
        let key = CacheKey::embedding(model, text);
        let hit = self.entries.get(&key).await;
        if hit.is_some() {
            tracing::trace!("Embedding cache hit: {}", model);
        }
        hit
    }

    /// Store an embedding
    pub async fn insert(&self, model: &str, text: &str, embedding: Arc<Vec<f64>>) {
        self.entries
            .insert(CacheKey::embedding(model, text), embedding)
            .await;
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for an embedding
    pub fn embedding(model: &str, text: &str) -> String {
        format!("emb:{}:{}", model, text)
    }
}
