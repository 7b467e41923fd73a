//! Consultation referrals: entering and leaving `for_consultation`.

use common::{Actor, CertificationStatus, Submission, SubmissionId, Trigger};
use tracing::instrument;

use super::bulk::BulkOutcome;
use super::engine::WorkflowEngine;
use super::error::WorkflowError;
use crate::store::SubmissionFilter;

impl WorkflowEngine {
    /// Refer a submission for consultation. The reason is mandatory.
    pub async fn advise_for_consultation(
        &self,
        id: &str,
        actor: &Actor,
        reason: &str,
    ) -> Result<Submission, WorkflowError> {
        self.apply_transition(id, Trigger::AdviseConsultation, actor, Some(reason))
            .await
    }

    /// Withdraw a referral. Always lands in `pending`, whatever the
    /// submission was before it was referred.
    pub async fn cancel_advice(&self, id: &str, actor: &Actor) -> Result<Submission, WorkflowError> {
        self.apply_transition(id, Trigger::CancelAdvice, actor, None)
            .await
    }

    /// Cancel every open referral, optionally within one period.
    #[instrument(skip(self, actor), fields(actor = %actor.id))]
    pub async fn clear_referrals(
        &self,
        academic_period_id: Option<&str>,
        actor: &Actor,
    ) -> Result<BulkOutcome, WorkflowError> {
        let filter = SubmissionFilter {
            status: Some(CertificationStatus::ForConsultation),
            academic_period_id: academic_period_id.map(str::to_string),
            ..Default::default()
        };
        let ids: Vec<SubmissionId> = self
            .list_submissions(&filter)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        Ok(self.apply_bulk(&ids, Trigger::CancelAdvice, actor, None).await)
    }
}
