use common::SubmissionId;
use sea_orm::DbErr;

/// Errors returned by a [`SubmissionStore`](super::SubmissionStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("submission not found: {0}")]
    NotFound(SubmissionId),
    /// The stored version no longer matches the one the caller read.
    #[error("submission {id} no longer at version {expected}")]
    VersionConflict { id: SubmissionId, expected: i64 },
    #[error("submission already exists: {0}")]
    AlreadyExists(SubmissionId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
