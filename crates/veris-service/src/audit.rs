//! Audit trail for eligibility and coverage admin operations.
//!
//! Audit publishing is best effort: failures are retried a few times and
//! then logged, never surfaced to the caller.

use crate::retry::RetryPolicy;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shaku::Component;
use tracing::{info, warn};
use uuid::Uuid;
use veris_core::{Interface, VerisResult};

/// Logical service name stamped on every audit event.
pub const SERVICE_NAME: &str = "eligibility-service";

/// An audit event describing one operation against the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_id: Uuid,
    pub event_type: String,
    pub user_id: String,
    pub client_ip: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub data: Value,
}

impl AuditEvent {
    /// Creates an event stamped with a fresh ID and the current time.
    #[must_use]
    pub fn new(
        event_type: impl Into<String>,
        user_id: impl Into<String>,
        client_ip: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            event_type: event_type.into(),
            user_id: user_id.into(),
            client_ip: client_ip.into(),
            timestamp: Utc::now(),
            service: SERVICE_NAME.to_string(),
            data,
        }
    }
}

/// Sink for audit events.
#[async_trait]
pub trait AuditPublisher: Interface {
    /// Publishes a single audit event.
    async fn publish(&self, event: AuditEvent) -> VerisResult<()>;
}

/// Audit publisher that writes events to the structured log.
#[derive(Component)]
#[shaku(interface = AuditPublisher)]
pub struct LogAuditPublisher {}

impl LogAuditPublisher {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for LogAuditPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditPublisher for LogAuditPublisher {
    async fn publish(&self, event: AuditEvent) -> VerisResult<()> {
        info!(
            target: "audit",
            event_id = %event.event_id,
            event_type = %event.event_type,
            user_id = %event.user_id,
            client_ip = %event.client_ip,
            data = %event.data,
            "audit event"
        );
        Ok(())
    }
}

/// Publishes an event with retries, swallowing the final failure.
pub async fn publish_best_effort(
    publisher: &dyn AuditPublisher,
    retry: &RetryPolicy,
    event: AuditEvent,
) {
    let result = retry
        .execute(|| {
            let event = event.clone();
            async move { publisher.publish(event).await }
        })
        .await;

    if let Err(e) = result {
        warn!(
            event_type = %event.event_type,
            error = %e,
            "Failed to publish audit event"
        );
    }
}
