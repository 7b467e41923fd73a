use async_trait::async_trait;
use common::{StatusUpdate, Submission};

use super::error::StoreError;
use super::filter::SubmissionFilter;

/// Durable record of submissions, keyed by id.
///
/// The workflow engine reads records and writes only the status-related
/// fields through `compare_and_set`. Submissions are created by the upload
/// subsystem via `insert`; the engine never calls it.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Fetch one submission.
    async fn get(&self, id: &str) -> Result<Option<Submission>, StoreError>;

    /// Write `update` in a single operation if the stored version is still
    /// `expected_version`, bumping the version by one.
    ///
    /// Fails with `VersionConflict` when another writer got there first and
    /// with `NotFound` when the id does not resolve.
    async fn compare_and_set(
        &self,
        id: &str,
        expected_version: i64,
        update: &StatusUpdate,
    ) -> Result<(), StoreError>;

    /// Candidate submissions for `filter`.
    ///
    /// Implementations may apply any subset of the filter, but must never drop
    /// a submission that matches it. Callers re-apply the full filter.
    async fn query(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, StoreError>;

    /// Add a new submission.
    async fn insert(&self, submission: Submission) -> Result<(), StoreError>;
}
