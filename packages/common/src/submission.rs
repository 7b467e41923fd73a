use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::certification_status::CertificationStatus;
use crate::document_slots::DocumentSlots;

pub type SubmissionId = String;

/// One uploaded medical-document packet.
///
/// Profile fields (`display_name`, `external_id`) and the document slots are
/// owned by the upload subsystem. The workflow only ever changes the fields
/// carried by [`StatusUpdate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub academic_period_id: String,
    pub display_name: String,
    pub external_id: String,
    #[serde(default = "DocumentSlots::standard")]
    pub required_document_slots: DocumentSlots,
    #[serde(default)]
    pub status: CertificationStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub consultation_reason: Option<String>,
    #[serde(default)]
    pub advised_for_consultation_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub certificate_issued_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    /// Bumped on every persisted transition; used for compare-and-set.
    #[serde(default)]
    pub version: i64,
}

impl Submission {
    /// A freshly uploaded packet: `pending`, no reviewer, version 0.
    pub fn new(
        id: impl Into<SubmissionId>,
        academic_period_id: impl Into<String>,
        display_name: impl Into<String>,
        external_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            academic_period_id: academic_period_id.into(),
            display_name: display_name.into(),
            external_id: external_id.into(),
            required_document_slots: DocumentSlots::standard(),
            status: CertificationStatus::Pending,
            rejection_reason: None,
            consultation_reason: None,
            advised_for_consultation_at: None,
            reviewed_at: None,
            certificate_issued_at: None,
            created_at,
            reviewed_by: None,
            version: 0,
        }
    }

    pub fn with_documents(mut self, slots: DocumentSlots) -> Self {
        self.required_document_slots = slots;
        self
    }

    /// The timestamp listings sort and date-filter on.
    ///
    /// First non-null of: consultation referral, review, certificate
    /// issuance, upload. Every ordering and range check goes through here.
    pub fn last_relevant_at(&self) -> DateTime<Utc> {
        self.advised_for_consultation_at
            .or(self.reviewed_at)
            .or(self.certificate_issued_at)
            .unwrap_or(self.created_at)
    }

    pub fn completion_percent(&self) -> u8 {
        self.required_document_slots.completion_percent()
    }

    /// Overwrite the workflow-owned fields and bump the version.
    pub fn apply(&mut self, update: &StatusUpdate) {
        self.status = update.status;
        self.rejection_reason = update.rejection_reason.clone();
        self.consultation_reason = update.consultation_reason.clone();
        self.advised_for_consultation_at = update.advised_for_consultation_at;
        self.reviewed_at = update.reviewed_at;
        self.certificate_issued_at = update.certificate_issued_at;
        self.reviewed_by = Some(update.reviewed_by.clone());
        self.version += 1;
    }
}

/// The complete set of workflow-owned fields written by one transition.
///
/// Stores persist it as a single write; fields set to `None` are cleared.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: CertificationStatus,
    pub rejection_reason: Option<String>,
    pub consultation_reason: Option<String>,
    pub advised_for_consultation_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub certificate_issued_at: Option<DateTime<Utc>>,
    pub reviewed_by: String,
}
