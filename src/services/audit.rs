use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

/// Operation names recorded in audit events
pub const CANDIDATE_MATCH: &str = "candidateMatch";
pub const TALENT_MATCH: &str = "talentMatch";
pub const RAG_PIPELINE: &str = "ragPipeline";

/// Errors that can occur when recording an audit event
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Audit sink unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of an audited operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Success,
    Failure,
}

/// Structured audit record emitted after every invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub event_id: Uuid,
    pub event: String,
    pub tenant_id: Option<String>,
    pub user_id: Option<String>,
    pub status: AuditStatus,
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(
        event: &str,
        tenant_id: Option<&str>,
        user_id: Option<&str>,
        status: AuditStatus,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event: event.to_string(),
            tenant_id: tenant_id.map(str::to_string),
            user_id: user_id.map(str::to_string),
            status,
            timestamp: Utc::now(),
        }
    }
}

/// Destination for audit events
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError>;
}

/// Writes audit events as JSON lines through `tracing` (target `audit`)
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError> {
        let line = serde_json::to_string(event)?;
        tracing::info!(target: "audit", "{}", line);
        Ok(())
    }
}

/// Keeps audit events in memory
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError> {
        let mut events = self
            .events
            .lock()
            .map_err(|e| AuditError::Unavailable(e.to_string()))?;
        events.push(event.clone());
        Ok(())
    }
}

/// Record an event, logging instead of failing if the sink rejects it
pub fn record_or_warn(sink: &dyn AuditSink, event: AuditEvent) {
    if let Err(e) = sink.record(&event) {
        tracing::warn!("Failed to record audit event {} ({}): {}", event.event, event.event_id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    impl AuditSink for FailingSink {
        fn record(&self, _event: &AuditEvent) -> Result<(), AuditError> {
            Err(AuditError::Unavailable("disk full".to_string()))
        }
    }

    #[test]
    fn test_event_serialization() {
        let event = AuditEvent::new(CANDIDATE_MATCH, Some("t1"), None, AuditStatus::Success);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "candidateMatch");
        assert_eq!(json["tenantId"], "t1");
        assert!(json["userId"].is_null());
        assert_eq!(json["status"], "success");
        assert!(json.get("eventId").is_some());
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemoryAuditSink::new();
        record_or_warn(&sink, AuditEvent::new(TALENT_MATCH, None, None, AuditStatus::Success));
        record_or_warn(&sink, AuditEvent::new(RAG_PIPELINE, None, Some("u1"), AuditStatus::Failure));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event, TALENT_MATCH);
        assert_eq!(events[1].user_id.as_deref(), Some("u1"));
        assert_eq!(events[1].status, AuditStatus::Failure);
    }

    #[test]
    fn test_sink_failure_does_not_panic() {
        record_or_warn(&FailingSink, AuditEvent::new(CANDIDATE_MATCH, None, None, AuditStatus::Success));
        assert!(TracingAuditSink
            .record(&AuditEvent::new(CANDIDATE_MATCH, None, None, AuditStatus::Success))
            .is_ok());
    }
}
