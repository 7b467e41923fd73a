use chrono::{DateTime, Utc};
use common::{CertificationStatus, DocumentSlots, Submission, Trigger, available_triggers};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, workflow_message};
use crate::workflow::{BulkOutcome, StatusCount};

use super::shared::Pagination;

/// Query value that lifts the period filter.
pub const ALL_PERIODS: &str = "all";

/// Query parameters for submission listing.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SubmissionListQuery {
    #[param(example = 1)]
    pub page: Option<u64>,
    #[param(example = 20)]
    pub per_page: Option<u64>,
    /// Filter by status.
    pub status: Option<CertificationStatus>,
    /// Academic period id, or `all`. Defaults to the current period.
    #[param(example = "2025-1")]
    pub period: Option<String>,
    /// Case-insensitive match on student name or student number.
    #[param(example = "cruz")]
    pub q: Option<String>,
    /// Inclusive lower bound on the last relevant timestamp.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the last relevant timestamp.
    pub to: Option<DateTime<Utc>>,
}

pub fn validate_list_query(query: &SubmissionListQuery) -> Result<(), AppError> {
    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Err(AppError::Validation("`from` must not be after `to`".into()));
    }
    if query.page == Some(0) {
        return Err(AppError::Validation("Page numbers start at 1".into()));
    }
    Ok(())
}

/// Period scope for counts and referral clearing.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct PeriodQuery {
    /// Academic period id, or `all`. Defaults to the current period.
    #[param(example = "2025-1")]
    pub period: Option<String>,
}

/// Full submission details as shown on the review dashboard.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SubmissionResponse {
    #[schema(example = "S1")]
    pub id: String,
    #[schema(example = "2025-1")]
    pub academic_period_id: String,
    #[schema(example = "Ana Cruz")]
    pub display_name: String,
    #[schema(example = "2021-00001")]
    pub external_id: String,
    pub status: CertificationStatus,
    pub documents: DocumentSlots,
    /// Slots still waiting for an upload.
    #[schema(example = json!(["drug_test", "hepa_b"]))]
    pub missing_documents: Vec<String>,
    #[schema(example = 67)]
    pub completion_percent: u8,
    pub rejection_reason: Option<String>,
    pub consultation_reason: Option<String>,
    pub advised_for_consultation_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub certificate_issued_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[schema(example = "staff_A")]
    pub reviewed_by: Option<String>,
    /// Timestamp the dashboard sorts and date-filters on.
    pub last_relevant_at: DateTime<Utc>,
    /// Triggers legal from the current status.
    pub available_actions: Vec<Trigger>,
    #[schema(example = 2)]
    pub version: i64,
}

impl From<&Submission> for SubmissionResponse {
    fn from(s: &Submission) -> Self {
        Self {
            id: s.id.clone(),
            academic_period_id: s.academic_period_id.clone(),
            display_name: s.display_name.clone(),
            external_id: s.external_id.clone(),
            status: s.status,
            documents: s.required_document_slots.clone(),
            missing_documents: s
                .required_document_slots
                .missing()
                .into_iter()
                .map(str::to_string)
                .collect(),
            completion_percent: s.completion_percent(),
            rejection_reason: s.rejection_reason.clone(),
            consultation_reason: s.consultation_reason.clone(),
            advised_for_consultation_at: s.advised_for_consultation_at,
            reviewed_at: s.reviewed_at,
            certificate_issued_at: s.certificate_issued_at,
            created_at: s.created_at,
            reviewed_by: s.reviewed_by.clone(),
            last_relevant_at: s.last_relevant_at(),
            available_actions: available_triggers(s.status),
            version: s.version,
        }
    }
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        Self::from(&s)
    }
}

/// Paginated submission listing.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionListResponse {
    pub data: Vec<SubmissionResponse>,
    pub pagination: Pagination,
    /// Period the listing was scoped to; `null` means all periods.
    #[schema(example = "2025-1")]
    pub period: Option<String>,
}

/// Request body for a single transition.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TransitionRequest {
    pub trigger: Trigger,
    /// Required for `reject` and `advise_consultation`.
    #[schema(example = "possible TB")]
    pub reason: Option<String>,
}

/// Request body for applying one trigger to many submissions.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct BulkTransitionRequest {
    #[schema(example = json!(["S1", "S2"]))]
    pub ids: Vec<String>,
    pub trigger: Trigger,
    #[schema(example = "incomplete documents")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BulkFailureResponse {
    #[schema(example = "S2")]
    pub id: String,
    #[schema(example = "INVALID_TRANSITION")]
    pub code: &'static str,
    #[schema(example = "Cannot verify a submission that is already issued")]
    pub message: String,
}

/// Per-id outcome of a bulk command. Successful ids are never rolled back.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BulkTransitionResponse {
    pub succeeded: Vec<SubmissionResponse>,
    pub failed: Vec<BulkFailureResponse>,
}

impl From<BulkOutcome> for BulkTransitionResponse {
    fn from(outcome: BulkOutcome) -> Self {
        Self {
            succeeded: outcome
                .succeeded
                .into_iter()
                .map(SubmissionResponse::from)
                .collect(),
            failed: outcome
                .failed
                .into_iter()
                .map(|f| BulkFailureResponse {
                    code: f.error.code(),
                    message: workflow_message(&f.error),
                    id: f.submission_id,
                })
                .collect(),
        }
    }
}

/// Per-status totals for dashboard tabs.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StatusCountsResponse {
    #[schema(example = "2025-1")]
    pub period: Option<String>,
    pub counts: Vec<StatusCount>,
    #[schema(example = 42)]
    pub total: u64,
}

/// One workflow trigger and where it applies.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TriggerInfo {
    pub trigger: Trigger,
    pub requires_reason: bool,
    /// Statuses this trigger is legal from.
    pub from: Vec<CertificationStatus>,
}
