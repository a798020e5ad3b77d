//! Audit trail for authentication activity.
//!
//! Writes are best-effort by contract: a sink failure is logged and never
//! aborts or rolls back the operation it describes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditKind {
    Login,
    LoginFailed,
    TokenRefreshed,
    Logout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub kind: AuditKind,
    /// Absent when the identifier resolved to no actor.
    pub actor_id: Option<Uuid>,
    pub tenant_id: Option<Uuid>,
    /// Origin address as presented by the transport layer. Free-form.
    pub origin: Option<String>,
    pub detail: Option<String>,
    pub at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(kind: AuditKind) -> Self {
        Self {
            kind,
            actor_id: None,
            tenant_id: None,
            origin: None,
            detail: None,
            at: Utc::now(),
        }
    }

    pub fn actor(mut self, id: Uuid) -> Self {
        self.actor_id = Some(id);
        self
    }

    pub fn tenant(mut self, id: Option<Uuid>) -> Self {
        self.tenant_id = id;
        self
    }

    pub fn origin(mut self, origin: &str) -> Self {
        self.origin = Some(origin.to_string());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Destination for audit events. Production backs this with the audit
/// store; the default sink emits structured log lines.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: AuditEvent) -> Result<(), AuditWriteError>;
}

#[derive(Debug, thiserror::Error)]
#[error("audit write failed: {0}")]
pub struct AuditWriteError(pub String);

/// Sink that emits each event as a structured `tracing` line.
#[derive(Default)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, event: AuditEvent) -> Result<(), AuditWriteError> {
        info!(
            kind = ?event.kind,
            actor = ?event.actor_id,
            tenant = ?event.tenant_id,
            origin = event.origin.as_deref().unwrap_or("-"),
            detail = event.detail.as_deref().unwrap_or("-"),
            "audit"
        );
        Ok(())
    }
}
