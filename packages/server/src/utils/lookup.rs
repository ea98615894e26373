use sea_orm::sea_query::LockType;
use sea_orm::{ConnectionTrait, DatabaseTransaction, EntityTrait, QuerySelect};

use crate::entity::{
    category, educational_resource, key_result, objective, roadmap_item, trail_activity,
};
use crate::error::AppError;

/// Look up a category by ID, returning 404 if not found.
pub async fn find_category<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<category::Model, AppError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))
}

/// Look up an objective by ID, returning 404 if not found.
pub async fn find_objective<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<objective::Model, AppError> {
    objective::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Objective not found".into()))
}

pub async fn find_objective_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<objective::Model, AppError> {
    objective::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Objective not found".into()))
}

/// Look up a key result by ID, returning 404 if not found.
pub async fn find_key_result<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<key_result::Model, AppError> {
    key_result::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Key result not found".into()))
}

pub async fn find_key_result_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<key_result::Model, AppError> {
    key_result::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Key result not found".into()))
}

/// Look up a roadmap item by ID, returning 404 if not found.
pub async fn find_roadmap_item<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<roadmap_item::Model, AppError> {
    roadmap_item::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Roadmap item not found".into()))
}

pub async fn find_educational_resource<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<educational_resource::Model, AppError> {
    educational_resource::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Educational resource not found".into()))
}

pub async fn find_trail_activity<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<trail_activity::Model, AppError> {
    trail_activity::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Trail activity not found".into()))
}
