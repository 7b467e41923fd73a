use async_trait::async_trait;
use common::AuditEntry;
use tokio::sync::Mutex;

use super::{AuditError, AuditSink};

/// Keeps the trail in process memory, in append order.
#[derive(Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        self.entries.lock().await.push(entry.clone());
        Ok(())
    }

    async fn history(&self, submission_id: &str) -> Result<Vec<AuditEntry>, AuditError> {
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .filter(|e| e.submission_id == submission_id)
            .cloned()
            .collect())
    }
}
