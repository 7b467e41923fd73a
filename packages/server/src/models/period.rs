use common::AcademicPeriod;
use serde::Serialize;

/// All known academic periods.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PeriodListResponse {
    pub data: Vec<AcademicPeriod>,
    /// Id of the current period, if one is configured.
    #[schema(example = "2025-1")]
    pub current: Option<String>,
}
