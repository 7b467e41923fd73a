use async_trait::async_trait;
use common::AuditEntry;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{AuditError, AuditSink};
use crate::entity::transition_audit;

/// Persists the trail to the `transition_audit` table.
#[derive(Clone)]
pub struct DbAuditSink {
    db: DatabaseConnection,
}

impl DbAuditSink {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditSink for DbAuditSink {
    async fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        let model = transition_audit::ActiveModel {
            submission_id: Set(entry.submission_id.clone()),
            from_state: Set(entry.from_state),
            to_state: Set(entry.to_state),
            trigger: Set(entry.trigger),
            actor: Set(entry.actor.clone()),
            actor_role: Set(entry.actor_role.clone()),
            reason: Set(entry.reason.clone()),
            recorded_at: Set(entry.recorded_at),
            ..Default::default()
        };
        model.insert(&self.db).await?;
        Ok(())
    }

    async fn history(&self, submission_id: &str) -> Result<Vec<AuditEntry>, AuditError> {
        let rows = transition_audit::Entity::find()
            .filter(transition_audit::Column::SubmissionId.eq(submission_id))
            .order_by_asc(transition_audit::Column::RecordedAt)
            .order_by_asc(transition_audit::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(AuditEntry::from).collect())
    }
}
