//! The certification state machine.
//!
//! Everything here is pure: given the current record, a trigger, an actor and
//! a clock reading, compute the [`StatusUpdate`] to persist or the reason it
//! is not allowed. Locking and persistence live in the server's engine.

use chrono::{DateTime, Utc};

use crate::certification_status::CertificationStatus;
use crate::submission::{StatusUpdate, Submission};
use crate::trigger::Trigger;

/// Why a trigger cannot be applied to a submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot {trigger} a submission that is {from}")]
    InvalidTransition {
        from: CertificationStatus,
        trigger: Trigger,
    },
    #[error("a reason is required to {trigger}")]
    MissingReason { trigger: Trigger },
}

/// The transition table: where `trigger` leads from `from`, if anywhere.
pub fn next_status(from: CertificationStatus, trigger: Trigger) -> Option<CertificationStatus> {
    use CertificationStatus::*;

    match (from, trigger) {
        (Pending, Trigger::Verify) => Some(Verified),
        (Pending, Trigger::Reject) => Some(Rejected),
        (Pending, Trigger::AdviseConsultation) => Some(ForConsultation),
        (ForConsultation, Trigger::Verify) => Some(Verified),
        (ForConsultation, Trigger::Reject) => Some(Rejected),
        (ForConsultation, Trigger::CancelAdvice) => Some(Pending),
        (Verified, Trigger::IssueCertificate) => Some(Issued),
        (Verified, Trigger::AdviseConsultation) => Some(ForConsultation),
        (Rejected, Trigger::AdviseConsultation) => Some(ForConsultation),
        _ => None,
    }
}

/// Triggers legal from `status`, in table order.
pub fn available_triggers(status: CertificationStatus) -> Vec<Trigger> {
    if status.is_terminal() {
        return Vec::new();
    }
    Trigger::ALL
        .iter()
        .copied()
        .filter(|t| next_status(status, *t).is_some())
        .collect()
}

/// Trimmed reason, or `None` when absent or blank.
pub fn normalize_reason(reason: Option<&str>) -> Option<String> {
    reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
}

/// Compute the write that moves `current` through `trigger`.
///
/// Legality is checked before the reason, so a blank reason on an illegal
/// trigger still reports `InvalidTransition`.
pub fn plan_transition(
    current: &Submission,
    trigger: Trigger,
    actor: &str,
    reason: Option<&str>,
    now: DateTime<Utc>,
) -> Result<StatusUpdate, TransitionError> {
    let from = current.status;
    let to = next_status(from, trigger)
        .ok_or(TransitionError::InvalidTransition { from, trigger })?;

    let reason = normalize_reason(reason);
    if trigger.requires_reason() && reason.is_none() {
        return Err(TransitionError::MissingReason { trigger });
    }

    let mut update = StatusUpdate {
        status: to,
        rejection_reason: current.rejection_reason.clone(),
        consultation_reason: current.consultation_reason.clone(),
        advised_for_consultation_at: current.advised_for_consultation_at,
        reviewed_at: current.reviewed_at,
        certificate_issued_at: current.certificate_issued_at,
        reviewed_by: actor.to_string(),
    };

    // Fields that only make sense in the state being left.
    if from == CertificationStatus::ForConsultation {
        update.consultation_reason = None;
        update.advised_for_consultation_at = None;
    }
    if from == CertificationStatus::Rejected {
        update.rejection_reason = None;
    }

    match trigger {
        Trigger::Verify => {
            update.reviewed_at = Some(now);
        }
        Trigger::Reject => {
            update.reviewed_at = Some(now);
            update.rejection_reason = reason;
        }
        Trigger::AdviseConsultation => {
            update.advised_for_consultation_at = Some(now);
            update.consultation_reason = reason;
        }
        Trigger::CancelAdvice => {}
        Trigger::IssueCertificate => {
            update.certificate_issued_at = Some(now);
        }
    }

    Ok(update)
}
