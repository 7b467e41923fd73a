use axum::{Json, extract::State};
use common::AcademicPeriod;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::period::PeriodListResponse;
use crate::periods::PeriodError;
use crate::state::AppState;

/// List academic periods.
#[utoipa::path(
    get,
    path = "/",
    tag = "Periods",
    operation_id = "listPeriods",
    summary = "List academic periods",
    description = "Returns every known academic period, oldest first, with the id of the current one.",
    responses(
        (status = 200, description = "Periods", body = PeriodListResponse),
        (status = 503, description = "Store unavailable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_periods(
    State(state): State<AppState>,
) -> Result<Json<PeriodListResponse>, AppError> {
    let data = state.periods.list().await?;
    let current = match state.periods.current().await {
        Ok(period) => Some(period.id),
        Err(PeriodError::NoCurrentPeriod) => None,
        Err(e) => return Err(e.into()),
    };
    Ok(Json(PeriodListResponse { data, current }))
}

/// Get the current academic period.
#[utoipa::path(
    get,
    path = "/current",
    tag = "Periods",
    operation_id = "getCurrentPeriod",
    summary = "Get the current academic period",
    description = "Returns the period listings are scoped to by default.",
    responses(
        (status = 200, description = "Current period", body = AcademicPeriod),
        (status = 404, description = "No current period configured (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn current_period(
    State(state): State<AppState>,
) -> Result<Json<AcademicPeriod>, AppError> {
    Ok(Json(state.periods.current().await?))
}
