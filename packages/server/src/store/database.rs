use async_trait::async_trait;
use common::{StatusUpdate, Submission};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

use super::error::StoreError;
use super::traits::SubmissionStore;
use crate::entity::submission;
use super::filter::SubmissionFilter;

/// PostgreSQL-backed submission store.
///
/// Compare-and-set is a conditional `UPDATE ... WHERE id = $1 AND version = $2`;
/// zero affected rows means the version moved or the row is gone.
#[derive(Clone)]
pub struct DbSubmissionStore {
    db: DatabaseConnection,
}

impl DbSubmissionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubmissionStore for DbSubmissionStore {
    async fn get(&self, id: &str) -> Result<Option<Submission>, StoreError> {
        let model = submission::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;
        Ok(model.map(Submission::from))
    }

    async fn compare_and_set(
        &self,
        id: &str,
        expected_version: i64,
        update: &StatusUpdate,
    ) -> Result<(), StoreError> {
        let result = submission::Entity::update_many()
            .col_expr(submission::Column::Status, Expr::value(update.status))
            .col_expr(
                submission::Column::RejectionReason,
                Expr::value(update.rejection_reason.clone()),
            )
            .col_expr(
                submission::Column::ConsultationReason,
                Expr::value(update.consultation_reason.clone()),
            )
            .col_expr(
                submission::Column::AdvisedForConsultationAt,
                Expr::value(update.advised_for_consultation_at),
            )
            .col_expr(
                submission::Column::ReviewedAt,
                Expr::value(update.reviewed_at),
            )
            .col_expr(
                submission::Column::CertificateIssuedAt,
                Expr::value(update.certificate_issued_at),
            )
            .col_expr(
                submission::Column::ReviewedBy,
                Expr::value(Some(update.reviewed_by.clone())),
            )
            .col_expr(
                submission::Column::Version,
                Expr::value(expected_version + 1),
            )
            .filter(submission::Column::Id.eq(id))
            .filter(submission::Column::Version.eq(expected_version))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            return Ok(());
        }

        let exists = submission::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .is_some();

        if exists {
            Err(StoreError::VersionConflict {
                id: id.to_string(),
                expected: expected_version,
            })
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    async fn query(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, StoreError> {
        let mut select = submission::Entity::find();

        if let Some(status) = filter.status {
            select = select.filter(submission::Column::Status.eq(status));
        }
        if let Some(ref period) = filter.academic_period_id {
            select = select.filter(submission::Column::AcademicPeriodId.eq(period.as_str()));
        }

        // Text and date-range matching need the derived timestamp; they run
        // in `SubmissionFilter::matches`.
        let models = select.all(&self.db).await?;

        Ok(models
            .into_iter()
            .map(Submission::from)
            .filter(|s| filter.matches(s))
            .collect())
    }

    async fn insert(&self, submission: Submission) -> Result<(), StoreError> {
        let id = submission.id.clone();
        let slots = serde_json::to_value(&submission.required_document_slots)
            .map_err(|e| StoreError::Unavailable(format!("cannot encode document slots: {e}")))?;

        let model = submission::ActiveModel {
            id: Set(submission.id),
            academic_period_id: Set(submission.academic_period_id),
            display_name: Set(submission.display_name),
            external_id: Set(submission.external_id),
            required_document_slots: Set(slots),
            status: Set(submission.status),
            rejection_reason: Set(submission.rejection_reason),
            consultation_reason: Set(submission.consultation_reason),
            advised_for_consultation_at: Set(submission.advised_for_consultation_at),
            reviewed_at: Set(submission.reviewed_at),
            certificate_issued_at: Set(submission.certificate_issued_at),
            created_at: Set(submission.created_at),
            reviewed_by: Set(submission.reviewed_by),
            version: Set(submission.version),
        };

        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(StoreError::AlreadyExists(id))
            }
            Err(e) => Err(e.into()),
        }
    }
}
