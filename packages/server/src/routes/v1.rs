use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/submissions", submission_routes())
        .nest("/periods", period_routes())
}

fn submission_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::submission::list_submissions))
        .routes(routes!(handlers::submission::status_counts))
        .routes(routes!(handlers::submission::list_triggers))
        .routes(routes!(handlers::submission::bulk_transition))
        .routes(routes!(handlers::submission::clear_referrals))
        .routes(routes!(handlers::submission::get_submission))
        .routes(routes!(handlers::submission::submission_history))
        .routes(routes!(handlers::submission::apply_transition))
}

fn period_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::period::list_periods))
        .routes(routes!(handlers::period::current_period))
}
