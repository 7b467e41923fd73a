pub mod period;
pub mod submission;

use tracing::debug;

use crate::error::AppError;
use crate::models::submission::ALL_PERIODS;
use crate::periods::PeriodError;
use crate::state::AppState;

/// Period scope for a request: an explicit id, `all` for no scope, or the
/// current period when the caller gives none.
pub(crate) async fn resolve_period(
    state: &AppState,
    requested: Option<&str>,
) -> Result<Option<String>, AppError> {
    match requested.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) if p.eq_ignore_ascii_case(ALL_PERIODS) => Ok(None),
        Some(p) => Ok(Some(p.to_string())),
        None => match state.periods.current().await {
            Ok(current) => Ok(Some(current.id)),
            Err(PeriodError::NoCurrentPeriod) => {
                debug!("No current period configured, listing all periods");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        },
    }
}
