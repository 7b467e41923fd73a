use common::AcademicPeriod;
use sea_orm::sea_query::{Expr, Index, IndexCreateStatement, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{academic_period, submission, transition_audit};

/// Insert configured periods missing from the `academic_period` table and
/// flag `current` as the current one.
pub async fn seed_periods(
    db: &DatabaseConnection,
    periods: &[AcademicPeriod],
    current: Option<&str>,
) -> Result<(), DbErr> {
    for period in periods {
        let exists = academic_period::Entity::find_by_id(period.id.clone())
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        academic_period::ActiveModel {
            id: Set(period.id.clone()),
            name: Set(period.name.clone()),
            starts_on: Set(period.starts_on),
            ends_on: Set(period.ends_on),
            is_current: Set(false),
        }
        .insert(db)
        .await?;
        info!(period = %period.id, "Seeded academic period");
    }

    if let Some(current) = current {
        academic_period::Entity::update_many()
            .col_expr(
                academic_period::Column::IsCurrent,
                Expr::col(academic_period::Column::Id).eq(current),
            )
            .exec(db)
            .await?;
    }

    Ok(())
}

pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Dashboard tabs: WHERE status = ? AND academic_period_id = ?
    let status_period = Index::create()
        .if_not_exists()
        .name("idx_submission_status_period")
        .table(submission::Entity)
        .col(submission::Column::Status)
        .col(submission::Column::AcademicPeriodId)
        .to_owned();
    create_index(db, "idx_submission_status_period", status_period).await;

    // History reads: WHERE submission_id = ? ORDER BY recorded_at
    let audit_trail = Index::create()
        .if_not_exists()
        .name("idx_transition_audit_submission_recorded")
        .table(transition_audit::Entity)
        .col(transition_audit::Column::SubmissionId)
        .col(transition_audit::Column::RecordedAt)
        .to_owned();
    create_index(db, "idx_transition_audit_submission_recorded", audit_trail).await;

    Ok(())
}

async fn create_index(db: &DatabaseConnection, name: &str, stmt: IndexCreateStatement) {
    match db
        .execute_unprepared(&stmt.to_string(PostgresQueryBuilder))
        .await
    {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
    }
}
