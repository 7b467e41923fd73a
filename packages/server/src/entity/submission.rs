use common::{CertificationStatus, DocumentSlots, Submission};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A medical-document packet and its certification state.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub academic_period_id: String,

    pub display_name: String,

    #[sea_orm(indexed)]
    pub external_id: String,

    /// Slot name -> file reference (or null), as a JSON object.
    #[sea_orm(column_type = "JsonBinary")]
    pub required_document_slots: serde_json::Value,

    #[sea_orm(indexed)]
    pub status: CertificationStatus,

    #[sea_orm(column_type = "Text", nullable)]
    pub rejection_reason: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub consultation_reason: Option<String>,

    pub advised_for_consultation_at: Option<DateTimeUtc>,

    pub reviewed_at: Option<DateTimeUtc>,

    pub certificate_issued_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,

    pub reviewed_by: Option<String>,

    /// Incremented on every status write.
    #[sea_orm(default_value = 0)]
    pub version: i64,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Submission {
    fn from(m: Model) -> Self {
        let required_document_slots =
            match serde_json::from_value::<DocumentSlots>(m.required_document_slots) {
                Ok(slots) => slots,
                Err(e) => {
                    warn!(
                        submission_id = %m.id,
                        error = %e,
                        "Unreadable document slots, showing the packet as empty"
                    );
                    DocumentSlots::default()
                }
            };

        Self {
            id: m.id,
            academic_period_id: m.academic_period_id,
            display_name: m.display_name,
            external_id: m.external_id,
            required_document_slots,
            status: m.status,
            rejection_reason: m.rejection_reason,
            consultation_reason: m.consultation_reason,
            advised_for_consultation_at: m.advised_for_consultation_at,
            reviewed_at: m.reviewed_at,
            certificate_issued_at: m.certificate_issued_at,
            created_at: m.created_at,
            reviewed_by: m.reviewed_by,
            version: m.version,
        }
    }
}
