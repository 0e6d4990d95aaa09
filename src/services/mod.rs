// Service exports
pub mod audit;
pub mod cache;
pub mod embeddings;
pub mod workflows;

pub use audit::{AuditError, AuditEvent, AuditSink, AuditStatus, MemoryAuditSink, TracingAuditSink};
pub use cache::{CacheKey, EmbeddingCache};
pub use embeddings::{ChatMessage, EmbeddingClient, EmbeddingError};
pub use workflows::{RagAnswer, WorkflowError};
