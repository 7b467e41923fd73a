use axum::{
    Json,
    extract::{Path, Query, State},
};
use common::{AuditEntry, CertificationStatus, Trigger, available_triggers};
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::actor::CallerActor;
use crate::extractors::json::AppJson;
use crate::models::shared::{Pagination, validate_bulk_ids};
use crate::models::submission::{
    BulkTransitionRequest, BulkTransitionResponse, PeriodQuery, StatusCountsResponse,
    SubmissionListQuery, SubmissionListResponse, SubmissionResponse, TransitionRequest,
    TriggerInfo, validate_list_query,
};
use crate::state::AppState;
use crate::workflow::SubmissionFilter;

use super::resolve_period;

/// List submissions for the review dashboard.
#[utoipa::path(
    get,
    path = "/",
    tag = "Submissions",
    operation_id = "listSubmissions",
    summary = "List submissions",
    description = "Returns submissions ordered by last relevant timestamp (most recent first, ties by id). All filters are optional and combine with AND. Without `period`, the listing is scoped to the current academic period; `period=all` lifts the scope.",
    params(SubmissionListQuery),
    responses(
        (status = 200, description = "Page of submissions", body = SubmissionListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Store unavailable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<SubmissionListQuery>,
) -> Result<Json<SubmissionListResponse>, AppError> {
    validate_list_query(&query)?;

    let listing_config = &state.config.listing;
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(listing_config.default_page_size)
        .clamp(1, listing_config.max_page_size.max(1));

    let period = resolve_period(&state, query.period.as_deref()).await?;

    let mut filter = SubmissionFilter::new().with_date_range(query.from, query.to);
    if let Some(status) = query.status {
        filter = filter.with_status(status);
    }
    if let Some(ref period) = period {
        filter = filter.with_period(period.as_str());
    }
    if let Some(ref q) = query.q {
        filter = filter.with_text(q.as_str());
    }

    let listing = state.engine.list_submissions(&filter).await?;
    let slice = listing.page(page, per_page);

    Ok(Json(SubmissionListResponse {
        data: slice.items.iter().map(SubmissionResponse::from).collect(),
        pagination: Pagination {
            page: slice.page,
            per_page: slice.per_page,
            total: slice.total,
            total_pages: slice.total_pages,
        },
        period,
    }))
}

/// Per-status submission counts.
#[utoipa::path(
    get,
    path = "/counts",
    tag = "Submissions",
    operation_id = "countSubmissionsByStatus",
    summary = "Count submissions per status",
    description = "Returns one entry per status, zero included. Scoped like the listing: current period by default, `period=all` for every period.",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Counts per status", body = StatusCountsResponse),
        (status = 503, description = "Store unavailable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn status_counts(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<StatusCountsResponse>, AppError> {
    let period = resolve_period(&state, query.period.as_deref()).await?;
    let counts = state.engine.status_counts(period.as_deref()).await?;
    let total = counts.iter().map(|c| c.count).sum();

    Ok(Json(StatusCountsResponse {
        period,
        counts,
        total,
    }))
}

/// Get a single submission.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Submissions",
    operation_id = "getSubmission",
    summary = "Get submission details",
    description = "Returns the submission with its document completion and the actions legal from its current status.",
    params(
        ("id" = String, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission details", body = SubmissionResponse),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(submission_id = %id))]
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let submission = state.engine.get_submission(&id).await?;
    Ok(Json(SubmissionResponse::from(submission)))
}

/// Audit trail of one submission.
#[utoipa::path(
    get,
    path = "/{id}/history",
    tag = "Submissions",
    operation_id = "getSubmissionHistory",
    summary = "Get transition history",
    description = "Returns every recorded transition of the submission, oldest first. Empty when the configured audit sink cannot be read back.",
    params(
        ("id" = String, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Audit entries", body = Vec<AuditEntry>),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(submission_id = %id))]
pub async fn submission_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AuditEntry>>, AppError> {
    Ok(Json(state.engine.history(&id).await?))
}

/// Apply a workflow trigger.
#[utoipa::path(
    post,
    path = "/{id}/transitions",
    tag = "Submissions",
    operation_id = "applyTransition",
    summary = "Apply a workflow trigger",
    description = "Moves the submission through `trigger` and returns the persisted record. `reject` and `advise_consultation` require a non-blank reason. Retrying a trigger that already took effect fails with INVALID_TRANSITION.",
    params(
        ("id" = String, Path, description = "Submission ID")
    ),
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Transition applied", body = SubmissionResponse),
        (status = 400, description = "Missing reason (MISSING_REASON) or bad body (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "No actor (ACTOR_MISSING)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Not allowed from current status (INVALID_TRANSITION) or lost a race (CONCURRENT_MODIFICATION)", body = ErrorBody),
        (status = 503, description = "Store unavailable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("actor" = [])),
)]
#[instrument(skip(state, actor, payload), fields(submission_id = %id, trigger = %payload.trigger))]
pub async fn apply_transition(
    CallerActor(actor): CallerActor,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<TransitionRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let submission = state
        .engine
        .apply_transition(&id, payload.trigger, &actor, payload.reason.as_deref())
        .await?;
    Ok(Json(SubmissionResponse::from(submission)))
}

/// Apply one trigger to many submissions.
#[utoipa::path(
    post,
    path = "/bulk-transitions",
    tag = "Submissions",
    operation_id = "bulkTransition",
    summary = "Apply a trigger to many submissions",
    description = "Runs one independent transition per id. Ids that fail are reported with their error code; ids that succeed stay applied.",
    request_body = BulkTransitionRequest,
    responses(
        (status = 200, description = "Per-id outcome", body = BulkTransitionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "No actor (ACTOR_MISSING)", body = ErrorBody),
    ),
    security(("actor" = [])),
)]
#[instrument(skip(state, actor, payload), fields(trigger = %payload.trigger, count = payload.ids.len()))]
pub async fn bulk_transition(
    CallerActor(actor): CallerActor,
    State(state): State<AppState>,
    AppJson(payload): AppJson<BulkTransitionRequest>,
) -> Result<Json<BulkTransitionResponse>, AppError> {
    validate_bulk_ids(&payload.ids, "ids", state.config.listing.bulk_max)?;

    let outcome = state
        .engine
        .apply_bulk(&payload.ids, payload.trigger, &actor, payload.reason.as_deref())
        .await;

    if !outcome.failed.is_empty() {
        info!(failed = ?outcome.failed_ids(), "Bulk transition had failures");
    }
    Ok(Json(BulkTransitionResponse::from(outcome)))
}

/// Cancel every open consultation referral.
#[utoipa::path(
    post,
    path = "/clear-referrals",
    tag = "Referrals",
    operation_id = "clearReferrals",
    summary = "Clear all consultation referrals",
    description = "Cancels the referral of every submission currently `for_consultation`, returning each to `pending`. Scoped to the current period unless `period` is given; `period=all` clears every period.",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Per-id outcome", body = BulkTransitionResponse),
        (status = 401, description = "No actor (ACTOR_MISSING)", body = ErrorBody),
        (status = 503, description = "Store unavailable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("actor" = [])),
)]
#[instrument(skip(state, actor))]
pub async fn clear_referrals(
    CallerActor(actor): CallerActor,
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<BulkTransitionResponse>, AppError> {
    let period = resolve_period(&state, query.period.as_deref()).await?;
    let outcome = state
        .engine
        .clear_referrals(period.as_deref(), &actor)
        .await?;

    info!(
        period = period.as_deref().unwrap_or("all"),
        cleared = outcome.succeeded.len(),
        failed = outcome.failed.len(),
        "Referrals cleared"
    );
    Ok(Json(BulkTransitionResponse::from(outcome)))
}

/// Trigger names accepted by the transition endpoints, for clients building menus.
#[utoipa::path(
    get,
    path = "/triggers",
    tag = "Submissions",
    operation_id = "listTriggers",
    summary = "List workflow triggers",
    description = "Returns each trigger with whether it requires a reason and the statuses it applies from.",
    responses(
        (status = 200, description = "Trigger catalogue", body = Vec<TriggerInfo>),
    ),
)]
pub async fn list_triggers() -> Json<Vec<TriggerInfo>> {
    Json(
        Trigger::ALL
            .iter()
            .map(|trigger| TriggerInfo {
                trigger: *trigger,
                requires_reason: trigger.requires_reason(),
                from: CertificationStatus::ALL
                    .iter()
                    .copied()
                    .filter(|status| available_triggers(*status).contains(trigger))
                    .collect(),
            })
            .collect(),
    )
}
