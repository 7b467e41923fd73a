use async_trait::async_trait;
use common::{StatusUpdate, Submission, SubmissionId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::error::StoreError;
use super::traits::SubmissionStore;
use super::filter::SubmissionFilter;

/// Process-local submission store backed by a concurrent map.
///
/// Used for tests and for running the service without a database.
#[derive(Default)]
pub struct MemorySubmissionStore {
    records: DashMap<SubmissionId, Submission>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn get(&self, id: &str) -> Result<Option<Submission>, StoreError> {
        Ok(self.records.get(id).map(|r| r.value().clone()))
    }

    async fn compare_and_set(
        &self,
        id: &str,
        expected_version: i64,
        update: &StatusUpdate,
    ) -> Result<(), StoreError> {
        let mut record = self
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if record.version != expected_version {
            return Err(StoreError::VersionConflict {
                id: id.to_string(),
                expected: expected_version,
            });
        }

        record.apply(update);
        Ok(())
    }

    async fn query(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|r| filter.matches(r.value()))
            .map(|r| r.value().clone())
            .collect())
    }

    async fn insert(&self, submission: Submission) -> Result<(), StoreError> {
        match self.records.entry(submission.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(submission.id)),
            Entry::Vacant(slot) => {
                slot.insert(submission);
                Ok(())
            }
        }
    }
}
