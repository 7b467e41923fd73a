use async_trait::async_trait;
use common::AuditEntry;
use tracing::info;

use super::{AuditError, AuditSink};

/// Writes each entry as a structured `tracing` event on the `audit` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAuditSink;

#[async_trait]
impl AuditSink for LogAuditSink {
    async fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        info!(
            target: "audit",
            submission_id = %entry.submission_id,
            from = %entry.from_state,
            to = %entry.to_state,
            trigger = %entry.trigger,
            actor = %entry.actor,
            actor_role = entry.actor_role.as_deref(),
            reason = entry.reason.as_deref(),
            recorded_at = %entry.recorded_at,
            "Transition recorded"
        );
        Ok(())
    }
}
