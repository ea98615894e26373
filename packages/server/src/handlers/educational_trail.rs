use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::trail_activity;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::{AppJson, AppPath};
use crate::models::educational_trail::*;
use crate::models::shared::CompletionUpdate;
use crate::services::trail::{delete_trail, draft_trail, get_or_generate_trail, load_trail};
use crate::state::AppState;
use crate::utils::lookup::{find_roadmap_item, find_trail_activity};

#[utoipa::path(
    post,
    path = "/",
    tag = "Educational Trails",
    operation_id = "generateEducationalTrail",
    summary = "Get or generate the trail of a roadmap item",
    description = "Returns the existing trail (200) or generates a day-by-day plan (201). The day budget is the item's share of its key result's date, else of the objective's date, clamped to 3-30 days; 3 days when no date is known. Unreachable URLs are dropped.",
    request_body = CreateEducationalTrailRequest,
    responses(
        (status = 200, description = "Existing trail", body = EducationalTrailResponse),
        (status = 201, description = "Trail generated", body = EducationalTrailResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Roadmap item not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Generation failed (GENERATION_FAILED)", body = ErrorBody),
        (status = 504, description = "Generation timed out (GENERATION_TIMEOUT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(roadmap_item_id = payload.roadmap_item_id))]
pub async fn create_educational_trail(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEducationalTrailRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_educational_trail(&payload)?;

    let outcome = get_or_generate_trail(&state, payload.roadmap_item_id, &payload.item_title).await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.value)))
}

#[utoipa::path(
    post,
    path = "/draft",
    tag = "Educational Trails",
    operation_id = "draftEducationalTrail",
    summary = "Generate a standalone trail without saving it",
    description = "Generates a trail for a bare topic. The budget is the days left until `target_date` (at least 3), or 14 days without one.",
    request_body = DraftTrailRequest,
    responses(
        (status = 200, description = "Generated trail", body = DraftTrailResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Generation failed (GENERATION_FAILED)", body = ErrorBody),
        (status = 504, description = "Generation timed out (GENERATION_TIMEOUT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_draft_trail(
    State(state): State<AppState>,
    AppJson(payload): AppJson<DraftTrailRequest>,
) -> Result<Json<DraftTrailResponse>, AppError> {
    validate_draft_trail(&payload)?;
    let draft = draft_trail(&state, &payload.topic, payload.target_date).await?;
    Ok(Json(draft))
}

#[utoipa::path(
    get,
    path = "/{id}/educational-trail",
    tag = "Educational Trails",
    operation_id = "getEducationalTrail",
    summary = "Get the trail of a roadmap item",
    params(("id" = i32, Path, description = "Roadmap item ID")),
    responses(
        (status = 200, description = "Trail", body = EducationalTrailResponse),
        (status = 404, description = "Item or trail not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_educational_trail(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<EducationalTrailResponse>, AppError> {
    find_roadmap_item(&state.db, id).await?;
    let view = load_trail(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Educational trail not found".into()))?;
    Ok(Json(view))
}

#[utoipa::path(
    delete,
    path = "/{id}/educational-trail",
    tag = "Educational Trails",
    operation_id = "deleteEducationalTrail",
    summary = "Delete the trail of a roadmap item",
    params(("id" = i32, Path, description = "Roadmap item ID")),
    responses(
        (status = 204, description = "Trail deleted"),
        (status = 404, description = "Trail not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_educational_trail(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    delete_trail(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Educational Trails",
    operation_id = "updateTrailActivity",
    summary = "Mark a trail activity as done or not done",
    params(("id" = i32, Path, description = "Trail activity ID")),
    request_body = CompletionUpdate,
    responses(
        (status = 200, description = "Activity updated", body = TrailActivityResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Activity not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_trail_activity(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<CompletionUpdate>,
) -> Result<Json<TrailActivityResponse>, AppError> {
    let existing = find_trail_activity(&state.db, id).await?;

    let mut active: trail_activity::ActiveModel = existing.into();
    active.completed = Set(payload.completed);
    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}
