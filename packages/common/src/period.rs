use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An enrollment term submissions are scoped to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AcademicPeriod {
    #[schema(example = "2025-1")]
    pub id: String,
    #[schema(example = "First Semester 2025-2026")]
    pub name: String,
    #[serde(default)]
    pub starts_on: Option<NaiveDate>,
    #[serde(default)]
    pub ends_on: Option<NaiveDate>,
}
