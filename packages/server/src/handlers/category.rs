use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::category;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::{AppJson, AppPath};
use crate::models::category::*;
use crate::state::AppState;
use crate::utils::lookup::find_category;

#[utoipa::path(
    get,
    path = "/",
    tag = "Categories",
    operation_id = "listCategories",
    summary = "List categories",
    description = "Returns the three fixed categories ordered by ID.",
    responses(
        (status = 200, description = "List of categories", body = Vec<CategoryResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let rows = category::Entity::find()
        .order_by_asc(category::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    operation_id = "getCategory",
    summary = "Get a category by ID",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<CategoryResponse>, AppError> {
    let model = find_category(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Categories",
    operation_id = "updateCategory",
    summary = "Rename or describe a category",
    description = "Partially updates a category. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Name already used (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    validate_update_category(&payload)?;

    let existing = find_category(&state.db, id).await?;
    if payload == UpdateCategoryRequest::default() {
        return Ok(Json(existing.into()));
    }

    let mut active: category::ActiveModel = existing.into();
    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("A category with this name already exists".into())
        }
        _ => AppError::from(e),
    })?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Categories",
    operation_id = "createCategory",
    summary = "Create a category (not allowed)",
    description = "Categories are fixed; always answers 403.",
    responses(
        (status = 403, description = "Categories are fixed (FORBIDDEN)", body = ErrorBody),
    ),
)]
pub async fn create_category() -> AppError {
    AppError::Forbidden("Categories are fixed and cannot be created".into())
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    operation_id = "deleteCategory",
    summary = "Delete a category (not allowed)",
    description = "Categories are fixed; always answers 403.",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 403, description = "Categories are fixed (FORBIDDEN)", body = ErrorBody),
    ),
)]
pub async fn delete_category(AppPath(_id): AppPath<i32>) -> AppError {
    AppError::Forbidden("Categories are fixed and cannot be deleted".into())
}
