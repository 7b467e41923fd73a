//! Append-only transition audit trail.
//!
//! Sinks are best-effort: the engine logs a failed `record` and carries on.

mod database;
mod log;
mod memory;

use async_trait::async_trait;
use common::AuditEntry;
use sea_orm::DbErr;

pub use database::DbAuditSink;
pub use log::LogAuditSink;
pub use memory::MemoryAuditSink;

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit database error: {0}")]
    Database(#[from] DbErr),

    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: &AuditEntry) -> Result<(), AuditError>;

    /// Entries for one submission, oldest first. Sinks that cannot read back
    /// return an empty trail.
    async fn history(&self, _submission_id: &str) -> Result<Vec<AuditEntry>, AuditError> {
        Ok(Vec::new())
    }
}
