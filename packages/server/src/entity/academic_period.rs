use common::AcademicPeriod;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Enrollment term. Maintained by the registrar's tooling; read-only here.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "academic_period")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    pub starts_on: Option<Date>,

    pub ends_on: Option<Date>,

    /// Exactly one row is expected to be current.
    #[sea_orm(default_value = false, indexed)]
    pub is_current: bool,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AcademicPeriod {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            starts_on: m.starts_on,
            ends_on: m.ends_on,
        }
    }
}
