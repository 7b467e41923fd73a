//! Academic period lookup. Periods are owned elsewhere; this side only reads.

use async_trait::async_trait;
use common::AcademicPeriod;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::academic_period;

#[derive(Debug, thiserror::Error)]
pub enum PeriodError {
    #[error("no current academic period is configured")]
    NoCurrentPeriod,

    #[error("period database error: {0}")]
    Database(#[from] DbErr),
}

#[async_trait]
pub trait AcademicPeriodResolver: Send + Sync {
    /// The period listings default to.
    async fn current(&self) -> Result<AcademicPeriod, PeriodError>;

    /// Every known period, oldest first.
    async fn list(&self) -> Result<Vec<AcademicPeriod>, PeriodError>;
}

/// Periods fixed at startup from configuration.
pub struct StaticPeriodResolver {
    periods: Vec<AcademicPeriod>,
    current: Option<usize>,
}

impl StaticPeriodResolver {
    /// `current` names one of `periods`; when absent or unknown, the last
    /// period is current.
    pub fn new(periods: Vec<AcademicPeriod>, current: Option<&str>) -> Self {
        let current = current
            .and_then(|id| periods.iter().position(|p| p.id == id))
            .or_else(|| periods.len().checked_sub(1));
        Self { periods, current }
    }
}

#[async_trait]
impl AcademicPeriodResolver for StaticPeriodResolver {
    async fn current(&self) -> Result<AcademicPeriod, PeriodError> {
        self.current
            .and_then(|i| self.periods.get(i))
            .cloned()
            .ok_or(PeriodError::NoCurrentPeriod)
    }

    async fn list(&self) -> Result<Vec<AcademicPeriod>, PeriodError> {
        Ok(self.periods.clone())
    }
}

/// Reads the `academic_period` table; the row flagged `is_current` wins.
#[derive(Clone)]
pub struct DbPeriodResolver {
    db: DatabaseConnection,
}

impl DbPeriodResolver {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AcademicPeriodResolver for DbPeriodResolver {
    async fn current(&self) -> Result<AcademicPeriod, PeriodError> {
        academic_period::Entity::find()
            .filter(academic_period::Column::IsCurrent.eq(true))
            .order_by_desc(academic_period::Column::Id)
            .one(&self.db)
            .await?
            .map(AcademicPeriod::from)
            .ok_or(PeriodError::NoCurrentPeriod)
    }

    async fn list(&self) -> Result<Vec<AcademicPeriod>, PeriodError> {
        let rows = academic_period::Entity::find()
            .order_by_asc(academic_period::Column::StartsOn)
            .order_by_asc(academic_period::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(AcademicPeriod::from).collect())
    }
}
