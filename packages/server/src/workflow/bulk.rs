use common::{Actor, Submission, SubmissionId, Trigger};
use futures::stream::{self, StreamExt};
use tracing::{info, instrument};

use super::engine::WorkflowEngine;
use super::error::WorkflowError;

#[derive(Debug)]
pub struct BulkFailure {
    pub submission_id: SubmissionId,
    pub error: WorkflowError,
}

/// Per-id results of a bulk command. Successes are never rolled back.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    pub succeeded: Vec<Submission>,
    pub failed: Vec<BulkFailure>,
}

impl BulkOutcome {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn failed_ids(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.submission_id.as_str()).collect()
    }
}

impl WorkflowEngine {
    /// Apply one trigger to many submissions as independent transitions.
    ///
    /// Runs at most `bulk_concurrency` transitions at a time; each id still
    /// goes through its own lock and version check. Both result lists keep
    /// the input order.
    #[instrument(skip(self, ids, actor, reason), fields(count = ids.len(), actor = %actor.id))]
    pub async fn apply_bulk(
        &self,
        ids: &[SubmissionId],
        trigger: Trigger,
        actor: &Actor,
        reason: Option<&str>,
    ) -> BulkOutcome {
        let futures: Vec<_> = ids
            .iter()
            .map(|id| self.apply_transition(id, trigger, actor, reason))
            .collect();
        let results: Vec<_> = stream::iter(futures)
            .buffered(self.bulk_concurrency)
            .collect()
            .await;

        let mut outcome = BulkOutcome::default();
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(submission) => outcome.succeeded.push(submission),
                Err(error) => outcome.failed.push(BulkFailure {
                    submission_id: id.clone(),
                    error,
                }),
            }
        }

        info!(
            trigger = %trigger,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Bulk transition finished"
        );
        outcome
    }
}
