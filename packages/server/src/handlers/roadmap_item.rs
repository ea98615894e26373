use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::roadmap_item;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::{AppJson, AppPath};
use crate::models::roadmap::RoadmapItemResponse;
use crate::models::shared::CompletionUpdate;
use crate::state::AppState;
use crate::utils::lookup::find_roadmap_item;

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Roadmaps",
    operation_id = "updateRoadmapItem",
    summary = "Mark a roadmap item as done or not done",
    params(("id" = i32, Path, description = "Roadmap item ID")),
    request_body = CompletionUpdate,
    responses(
        (status = 200, description = "Item updated", body = RoadmapItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Roadmap item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_roadmap_item(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<CompletionUpdate>,
) -> Result<Json<RoadmapItemResponse>, AppError> {
    let existing = find_roadmap_item(&state.db, id).await?;

    let mut active: roadmap_item::ActiveModel = existing.into();
    active.completed = Set(payload.completed);
    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}
