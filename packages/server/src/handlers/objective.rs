use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{key_result, objective};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::{AppJson, AppPath, AppQuery};
use crate::models::key_result::KeyResultResponse;
use crate::models::objective::*;
use crate::services::cascade::{delete_key_results, key_result_ids_of};
use crate::services::key_result::{generate_key_results, scheduled_key_results};
use crate::state::AppState;
use crate::utils::lookup::{find_category, find_objective, find_objective_for_update};

#[utoipa::path(
    post,
    path = "/",
    tag = "Objectives",
    operation_id = "createObjective",
    summary = "Create an objective",
    request_body = CreateObjectiveRequest,
    responses(
        (status = 201, description = "Objective created", body = ObjectiveResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(category_id = payload.category_id))]
pub async fn create_objective(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateObjectiveRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_objective(&payload)?;
    find_category(&state.db, payload.category_id).await?;

    let now = Utc::now();
    let model = objective::ActiveModel {
        objective: Set(payload.objective.trim().to_string()),
        category_id: Set(payload.category_id),
        completion_date: Set(payload.completion_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(ObjectiveResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Objectives",
    operation_id = "listObjectives",
    summary = "List objectives",
    description = "Returns all objectives, newest first, optionally filtered by category.",
    params(ObjectiveListQuery),
    responses(
        (status = 200, description = "List of objectives", body = Vec<ObjectiveResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_objectives(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ObjectiveListQuery>,
) -> Result<Json<Vec<ObjectiveResponse>>, AppError> {
    let mut select = objective::Entity::find();
    if let Some(category_id) = query.category_id {
        select = select.filter(objective::Column::CategoryId.eq(category_id));
    }

    let rows = select
        .order_by_desc(objective::Column::CreatedAt)
        .order_by_desc(objective::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Objectives",
    operation_id = "getObjective",
    summary = "Get an objective by ID",
    params(("id" = i32, Path, description = "Objective ID")),
    responses(
        (status = 200, description = "Objective details", body = ObjectiveResponse),
        (status = 404, description = "Objective not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_objective(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ObjectiveResponse>, AppError> {
    let model = find_objective(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Objectives",
    operation_id = "updateObjective",
    summary = "Update an objective",
    description = "Partially updates an objective. `completion_date: null` clears the date. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Objective ID")),
    request_body = UpdateObjectiveRequest,
    responses(
        (status = 200, description = "Objective updated", body = ObjectiveResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Objective or category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_objective(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateObjectiveRequest>,
) -> Result<Json<ObjectiveResponse>, AppError> {
    validate_update_objective(&payload)?;

    if payload == UpdateObjectiveRequest::default() {
        let existing = find_objective(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_objective_for_update(&txn, id).await?;
    if let Some(category_id) = payload.category_id {
        find_category(&txn, category_id).await?;
    }

    let mut active: objective::ActiveModel = existing.into();
    if let Some(ref text) = payload.objective {
        active.objective = Set(text.trim().to_string());
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(completion_date) = payload.completion_date {
        active.completion_date = Set(completion_date);
    }
    active.updated_at = Set(Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Objectives",
    operation_id = "deleteObjective",
    summary = "Delete an objective",
    description = "Deletes the objective together with its key results, their roadmaps and all generated content below them.",
    params(("id" = i32, Path, description = "Objective ID")),
    responses(
        (status = 204, description = "Objective deleted"),
        (status = 404, description = "Objective not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_objective(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let _objective = find_objective_for_update(&txn, id).await?;

    let key_result_ids = key_result_ids_of(&txn, id).await?;
    delete_key_results(&txn, key_result_ids).await?;
    objective::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/generate-key-results",
    tag = "Objectives",
    operation_id = "generateKeyResults",
    summary = "Generate key results for an objective",
    description = "Asks the generation service for a batch of key results and stores them without dates. The returned dates are estimates spread up to the objective's date together with its other key results, as on listing.",
    params(("id" = i32, Path, description = "Objective ID")),
    responses(
        (status = 201, description = "Key results created", body = Vec<KeyResultResponse>),
        (status = 404, description = "Objective not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Generation failed (GENERATION_FAILED)", body = ErrorBody),
        (status = 504, description = "Generation timed out (GENERATION_TIMEOUT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn generate_objective_key_results(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let created = generate_key_results(&state, id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/{id}/key-results",
    tag = "Objectives",
    operation_id = "listObjectiveKeyResults",
    summary = "List the key results of an objective",
    description = "Key results in creation order. Those without a stored date get one spread up to the objective's date, flagged with `is_estimated`.",
    params(("id" = i32, Path, description = "Objective ID")),
    responses(
        (status = 200, description = "Key results", body = Vec<KeyResultResponse>),
        (status = 404, description = "Objective not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn list_objective_key_results(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<Vec<KeyResultResponse>>, AppError> {
    let objective = find_objective(&state.db, id).await?;
    let data = scheduled_key_results(&state.db, &objective, Utc::now()).await?;
    Ok(Json(data))
}
