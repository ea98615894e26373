use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{key_result, roadmap};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::{AppJson, AppPath};
use crate::models::key_result::*;
use crate::models::roadmap::RoadmapResponse;
use crate::services::cascade::{delete_key_results, delete_roadmaps};
use crate::services::roadmap::{get_or_generate_roadmap, load_roadmap};
use crate::state::AppState;
use crate::utils::lookup::{find_key_result, find_key_result_for_update, find_objective};

#[utoipa::path(
    post,
    path = "/",
    tag = "Key Results",
    operation_id = "createKeyResult",
    summary = "Create a key result",
    description = "Creates a key result under an objective. Without `expected_completion_date` the date is computed on read.",
    request_body = CreateKeyResultRequest,
    responses(
        (status = 201, description = "Key result created", body = KeyResultResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Objective not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(objective_id = payload.objective_id))]
pub async fn create_key_result(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateKeyResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_key_result(&payload)?;
    find_objective(&state.db, payload.objective_id).await?;

    let now = Utc::now();
    let model = key_result::ActiveModel {
        objective_id: Set(payload.objective_id),
        title: Set(payload.title.trim().to_string()),
        completed: Set(false),
        expected_completion_date: Set(payload.expected_completion_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(KeyResultResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Key Results",
    operation_id = "listKeyResults",
    summary = "List all key results",
    description = "Returns every key result with its stored date only.",
    responses(
        (status = 200, description = "List of key results", body = Vec<KeyResultResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_key_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<KeyResultResponse>>, AppError> {
    let rows = key_result::Entity::find()
        .order_by_asc(key_result::Column::ObjectiveId)
        .order_by_asc(key_result::Column::CreatedAt)
        .order_by_asc(key_result::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Key Results",
    operation_id = "getKeyResult",
    summary = "Get a key result by ID",
    params(("id" = i32, Path, description = "Key result ID")),
    responses(
        (status = 200, description = "Key result details", body = KeyResultResponse),
        (status = 404, description = "Key result not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_key_result(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<KeyResultResponse>, AppError> {
    let model = find_key_result(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Key Results",
    operation_id = "updateKeyResult",
    summary = "Update a key result",
    description = "Partially updates a key result. `expected_completion_date: null` clears the stored date so it is computed again on read.",
    params(("id" = i32, Path, description = "Key result ID")),
    request_body = UpdateKeyResultRequest,
    responses(
        (status = 200, description = "Key result updated", body = KeyResultResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Key result not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_key_result(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateKeyResultRequest>,
) -> Result<Json<KeyResultResponse>, AppError> {
    validate_update_key_result(&payload)?;

    if payload == UpdateKeyResultRequest::default() {
        let existing = find_key_result(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_key_result_for_update(&txn, id).await?;

    let mut active: key_result::ActiveModel = existing.into();
    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(completed) = payload.completed {
        active.completed = Set(completed);
    }
    if let Some(date) = payload.expected_completion_date {
        active.expected_completion_date = Set(date);
    }
    active.updated_at = Set(Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Key Results",
    operation_id = "deleteKeyResult",
    summary = "Delete a key result",
    description = "Deletes the key result with its roadmap and all generated content below it.",
    params(("id" = i32, Path, description = "Key result ID")),
    responses(
        (status = 204, description = "Key result deleted"),
        (status = 404, description = "Key result not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_key_result(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let _kr = find_key_result_for_update(&txn, id).await?;
    delete_key_results(&txn, vec![id]).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/roadmap",
    tag = "Roadmaps",
    operation_id = "generateRoadmap",
    summary = "Get or generate the roadmap of a key result",
    description = "Returns the existing roadmap (200) or generates one (201). The day budget comes from the key result's date, else its share of the objective's date, else 30 days; the item-count hint is derived from it.",
    params(("id" = i32, Path, description = "Key result ID")),
    responses(
        (status = 200, description = "Existing roadmap", body = RoadmapResponse),
        (status = 201, description = "Roadmap generated", body = RoadmapResponse),
        (status = 404, description = "Key result not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Generation failed (GENERATION_FAILED)", body = ErrorBody),
        (status = 504, description = "Generation timed out (GENERATION_TIMEOUT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn create_roadmap(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = get_or_generate_roadmap(&state, id).await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.value)))
}

#[utoipa::path(
    get,
    path = "/{id}/roadmap",
    tag = "Roadmaps",
    operation_id = "getRoadmap",
    summary = "Get the roadmap of a key result",
    params(("id" = i32, Path, description = "Key result ID")),
    responses(
        (status = 200, description = "Roadmap", body = RoadmapResponse),
        (status = 404, description = "Key result or roadmap not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_roadmap(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<RoadmapResponse>, AppError> {
    find_key_result(&state.db, id).await?;
    let roadmap = load_roadmap(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Roadmap not found".into()))?;
    Ok(Json(roadmap))
}

#[utoipa::path(
    delete,
    path = "/{id}/roadmap",
    tag = "Roadmaps",
    operation_id = "deleteRoadmap",
    summary = "Delete the roadmap of a key result",
    description = "Deletes the roadmap with its items and their educational content.",
    params(("id" = i32, Path, description = "Key result ID")),
    responses(
        (status = 204, description = "Roadmap deleted"),
        (status = 404, description = "Key result or roadmap not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_roadmap(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let _kr = find_key_result_for_update(&txn, id).await?;

    let roadmap_id: i32 = roadmap::Entity::find()
        .filter(roadmap::Column::KeyResultId.eq(id))
        .select_only()
        .column(roadmap::Column::Id)
        .into_tuple()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Roadmap not found".into()))?;

    delete_roadmaps(&txn, vec![roadmap_id]).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
