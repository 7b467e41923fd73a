use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::certification_status::CertificationStatus;
use crate::submission::SubmissionId;
use crate::trigger::Trigger;

/// Caller identity supplied by the identity layer on every command.
///
/// The role is recorded for the audit trail; it is never checked here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// One applied transition, as written to the append-only audit trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuditEntry {
    #[schema(example = "S1")]
    pub submission_id: SubmissionId,
    pub from_state: CertificationStatus,
    pub to_state: CertificationStatus,
    pub trigger: Trigger,
    #[schema(example = "staff_A")]
    pub actor: String,
    #[schema(example = "nurse")]
    pub actor_role: Option<String>,
    #[schema(example = "possible TB")]
    pub reason: Option<String>,
    #[schema(example = "2025-09-15T10:30:00Z")]
    pub recorded_at: DateTime<Utc>,
}
