use common::{AuditEntry, CertificationStatus, Trigger};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only record of applied workflow transitions.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transition_audit")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub submission_id: String,

    pub from_state: CertificationStatus,

    pub to_state: CertificationStatus,

    pub trigger: Trigger,

    #[sea_orm(indexed)]
    pub actor: String,

    pub actor_role: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub reason: Option<String>,

    pub recorded_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AuditEntry {
    fn from(m: Model) -> Self {
        Self {
            submission_id: m.submission_id,
            from_state: m.from_state,
            to_state: m.to_state,
            trigger: m.trigger,
            actor: m.actor,
            actor_role: m.actor_role,
            reason: m.reason,
            recorded_at: m.recorded_at,
        }
    }
}
