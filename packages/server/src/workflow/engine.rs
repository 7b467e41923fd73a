use std::sync::Arc;

use chrono::Utc;
use common::transition::normalize_reason;
use common::{Actor, AuditEntry, Submission, SubmissionId, Trigger, plan_transition};
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, instrument, warn};

use super::error::WorkflowError;
use crate::audit::AuditSink;
use crate::store::SubmissionStore;

/// Applies triggers to submissions.
///
/// A transition is one store read and one compare-and-set write. Within a
/// process, callers on the same id queue on a per-id mutex; across processes
/// the version check decides, and the loser gets `ConcurrentModification`.
pub struct WorkflowEngine {
    pub(super) store: Arc<dyn SubmissionStore>,
    audit: Arc<dyn AuditSink>,
    locks: DashMap<SubmissionId, Arc<Mutex<()>>>,
    /// Transitions a bulk command keeps in flight at once.
    pub(super) bulk_concurrency: usize,
}

pub const DEFAULT_BULK_CONCURRENCY: usize = 8;

/// Holds one id's mutex; drops the table entry once nobody else wants it.
struct IdLock<'a> {
    table: &'a DashMap<SubmissionId, Arc<Mutex<()>>>,
    id: &'a str,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for IdLock<'_> {
    fn drop(&mut self) {
        self.guard.take();
        // The table's own Arc is the only one left when no caller holds or
        // waits on this id.
        self.table
            .remove_if(self.id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl WorkflowEngine {
    pub fn new(store: Arc<dyn SubmissionStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            store,
            audit,
            locks: DashMap::new(),
            bulk_concurrency: DEFAULT_BULK_CONCURRENCY,
        }
    }

    /// Cap on concurrent transitions per bulk command. Zero is treated as one.
    pub fn with_bulk_concurrency(mut self, limit: usize) -> Self {
        self.bulk_concurrency = limit.max(1);
        self
    }

    async fn lock_id<'a>(&'a self, id: &'a str) -> IdLock<'a> {
        let mutex = self.locks.entry(id.to_string()).or_default().clone();
        IdLock {
            table: &self.locks,
            id,
            guard: Some(mutex.lock_owned().await),
        }
    }

    pub async fn get_submission(&self, id: &str) -> Result<Submission, WorkflowError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(id.to_string()))
    }

    /// Move a submission through `trigger` and return the persisted record.
    ///
    /// Errors are returned as-is and never retried. A failed audit write is
    /// logged and does not affect the result.
    #[instrument(skip(self, actor, reason), fields(actor = %actor.id))]
    pub async fn apply_transition(
        &self,
        id: &str,
        trigger: Trigger,
        actor: &Actor,
        reason: Option<&str>,
    ) -> Result<Submission, WorkflowError> {
        let _lock = self.lock_id(id).await;

        let mut submission = self.get_submission(id).await?;
        let from = submission.status;
        let now = Utc::now();

        let update = plan_transition(&submission, trigger, &actor.id, reason, now)?;

        self.store
            .compare_and_set(id, submission.version, &update)
            .await?;
        submission.apply(&update);

        info!(
            submission_id = %id,
            trigger = %trigger,
            from = %from,
            to = %submission.status,
            version = submission.version,
            "Transition applied"
        );

        let entry = AuditEntry {
            submission_id: submission.id.clone(),
            from_state: from,
            to_state: submission.status,
            trigger,
            actor: actor.id.clone(),
            actor_role: actor.role.clone(),
            reason: normalize_reason(reason),
            recorded_at: now,
        };
        if let Err(e) = self.audit.record(&entry).await {
            warn!(submission_id = %id, error = %e, "Failed to record audit entry");
        }

        Ok(submission)
    }

    /// Audit trail of one submission, oldest first.
    #[instrument(skip(self))]
    pub async fn history(&self, id: &str) -> Result<Vec<AuditEntry>, WorkflowError> {
        self.get_submission(id).await?;
        self.audit
            .history(id)
            .await
            .map_err(|e| WorkflowError::StoreUnavailable(e.to_string()))
    }

    #[cfg(test)]
    pub(super) fn tracked_locks(&self) -> usize {
        self.locks.len()
    }
}
