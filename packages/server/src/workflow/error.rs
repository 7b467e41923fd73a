use common::{CertificationStatus, SubmissionId, TransitionError, Trigger};

use crate::store::StoreError;

/// Outcome of a rejected workflow operation. Always returned to the caller;
/// the engine never retries.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("submission not found: {0}")]
    NotFound(SubmissionId),

    /// The trigger is not legal from the current status, including asking
    /// for the status the submission is already in.
    #[error("cannot {trigger} a submission that is {from}")]
    InvalidTransition {
        from: CertificationStatus,
        trigger: Trigger,
    },

    #[error("a reason is required to {trigger}")]
    MissingReason { trigger: Trigger },

    /// Another writer changed the submission between read and write.
    #[error("submission {0} was modified concurrently; refresh and retry")]
    ConcurrentModification(SubmissionId),

    #[error("submission store unavailable: {0}")]
    StoreUnavailable(String),
}

impl WorkflowError {
    /// Machine-readable code shared with the HTTP error body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::MissingReason { .. } => "MISSING_REASON",
            Self::ConcurrentModification(_) => "CONCURRENT_MODIFICATION",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

impl From<TransitionError> for WorkflowError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::InvalidTransition { from, trigger } => {
                Self::InvalidTransition { from, trigger }
            }
            TransitionError::MissingReason { trigger } => Self::MissingReason { trigger },
        }
    }
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::VersionConflict { id, .. } => Self::ConcurrentModification(id),
            StoreError::AlreadyExists(id) => {
                Self::StoreUnavailable(format!("unexpected duplicate submission {id}"))
            }
            StoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
        }
    }
}
