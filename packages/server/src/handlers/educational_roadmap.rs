use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::educational_resource;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::{AppJson, AppPath};
use crate::models::educational_roadmap::*;
use crate::models::shared::CompletionUpdate;
use crate::services::educational_roadmap::{
    get_or_generate_educational_roadmap, load_educational_roadmap,
};
use crate::state::AppState;
use crate::utils::lookup::{find_educational_resource, find_roadmap_item};

#[utoipa::path(
    post,
    path = "/",
    tag = "Educational Roadmaps",
    operation_id = "generateEducationalRoadmap",
    summary = "Get or generate the educational roadmap of a roadmap item",
    description = "Returns the existing educational roadmap (200) or generates a curated list of books, courses, videos, articles and projects for `item_title` (201).",
    request_body = CreateEducationalRoadmapRequest,
    responses(
        (status = 200, description = "Existing educational roadmap", body = EducationalRoadmapResponse),
        (status = 201, description = "Educational roadmap generated", body = EducationalRoadmapResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Roadmap item not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Generation failed (GENERATION_FAILED)", body = ErrorBody),
        (status = 504, description = "Generation timed out (GENERATION_TIMEOUT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(roadmap_item_id = payload.roadmap_item_id))]
pub async fn create_educational_roadmap(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEducationalRoadmapRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_educational_roadmap(&payload)?;

    let outcome =
        get_or_generate_educational_roadmap(&state, payload.roadmap_item_id, &payload.item_title)
            .await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.value)))
}

#[utoipa::path(
    get,
    path = "/{id}/educational-roadmap",
    tag = "Educational Roadmaps",
    operation_id = "getEducationalRoadmap",
    summary = "Get the educational roadmap of a roadmap item",
    params(("id" = i32, Path, description = "Roadmap item ID")),
    responses(
        (status = 200, description = "Educational roadmap", body = EducationalRoadmapResponse),
        (status = 404, description = "Item or educational roadmap not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_educational_roadmap(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<EducationalRoadmapResponse>, AppError> {
    find_roadmap_item(&state.db, id).await?;
    let view = load_educational_roadmap(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Educational roadmap not found".into()))?;
    Ok(Json(view))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Educational Roadmaps",
    operation_id = "updateEducationalResource",
    summary = "Mark an educational resource as done or not done",
    params(("id" = i32, Path, description = "Educational resource ID")),
    request_body = CompletionUpdate,
    responses(
        (status = 200, description = "Resource updated", body = EducationalResourceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Resource not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_educational_resource(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<CompletionUpdate>,
) -> Result<Json<EducationalResourceResponse>, AppError> {
    let existing = find_educational_resource(&state.db, id).await?;

    let mut active: educational_resource::ActiveModel = existing.into();
    active.completed = Set(payload.completed);
    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}
