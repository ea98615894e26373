//! Application-level cascade deletes. Callers run these inside a transaction.

use sea_orm::*;

use crate::entity::{
    educational_resource, educational_roadmap, educational_trail, key_result, roadmap,
    roadmap_category, roadmap_item, trail_activity, trail_resource, trail_step,
};

/// Delete trails with their steps, activities and resources.
pub async fn delete_trails<C: ConnectionTrait>(db: &C, trail_ids: Vec<i32>) -> Result<(), DbErr> {
    if trail_ids.is_empty() {
        return Ok(());
    }

    let step_ids: Vec<i32> = trail_step::Entity::find()
        .filter(trail_step::Column::TrailId.is_in(trail_ids.clone()))
        .select_only()
        .column(trail_step::Column::Id)
        .into_tuple()
        .all(db)
        .await?;

    if !step_ids.is_empty() {
        trail_activity::Entity::delete_many()
            .filter(trail_activity::Column::StepId.is_in(step_ids))
            .exec(db)
            .await?;
    }
    trail_step::Entity::delete_many()
        .filter(trail_step::Column::TrailId.is_in(trail_ids.clone()))
        .exec(db)
        .await?;
    trail_resource::Entity::delete_many()
        .filter(trail_resource::Column::TrailId.is_in(trail_ids.clone()))
        .exec(db)
        .await?;
    educational_trail::Entity::delete_many()
        .filter(educational_trail::Column::Id.is_in(trail_ids))
        .exec(db)
        .await?;

    Ok(())
}

/// Delete everything hanging off roadmap items: educational roadmaps and trails.
pub async fn delete_item_content<C: ConnectionTrait>(
    db: &C,
    item_ids: Vec<i32>,
) -> Result<(), DbErr> {
    if item_ids.is_empty() {
        return Ok(());
    }

    let edu_ids: Vec<i32> = educational_roadmap::Entity::find()
        .filter(educational_roadmap::Column::RoadmapItemId.is_in(item_ids.clone()))
        .select_only()
        .column(educational_roadmap::Column::Id)
        .into_tuple()
        .all(db)
        .await?;
    if !edu_ids.is_empty() {
        educational_resource::Entity::delete_many()
            .filter(educational_resource::Column::EducationalRoadmapId.is_in(edu_ids.clone()))
            .exec(db)
            .await?;
        educational_roadmap::Entity::delete_many()
            .filter(educational_roadmap::Column::Id.is_in(edu_ids))
            .exec(db)
            .await?;
    }

    let trail_ids: Vec<i32> = educational_trail::Entity::find()
        .filter(educational_trail::Column::RoadmapItemId.is_in(item_ids))
        .select_only()
        .column(educational_trail::Column::Id)
        .into_tuple()
        .all(db)
        .await?;
    delete_trails(db, trail_ids).await
}

/// Delete roadmaps with their categories, items and item content.
pub async fn delete_roadmaps<C: ConnectionTrait>(
    db: &C,
    roadmap_ids: Vec<i32>,
) -> Result<(), DbErr> {
    if roadmap_ids.is_empty() {
        return Ok(());
    }

    let category_ids: Vec<i32> = roadmap_category::Entity::find()
        .filter(roadmap_category::Column::RoadmapId.is_in(roadmap_ids.clone()))
        .select_only()
        .column(roadmap_category::Column::Id)
        .into_tuple()
        .all(db)
        .await?;

    if !category_ids.is_empty() {
        let item_ids: Vec<i32> = roadmap_item::Entity::find()
            .filter(roadmap_item::Column::CategoryId.is_in(category_ids.clone()))
            .select_only()
            .column(roadmap_item::Column::Id)
            .into_tuple()
            .all(db)
            .await?;

        delete_item_content(db, item_ids).await?;
        roadmap_item::Entity::delete_many()
            .filter(roadmap_item::Column::CategoryId.is_in(category_ids.clone()))
            .exec(db)
            .await?;
        roadmap_category::Entity::delete_many()
            .filter(roadmap_category::Column::Id.is_in(category_ids))
            .exec(db)
            .await?;
    }

    roadmap::Entity::delete_many()
        .filter(roadmap::Column::Id.is_in(roadmap_ids))
        .exec(db)
        .await?;

    Ok(())
}

/// Delete key results with their roadmaps.
pub async fn delete_key_results<C: ConnectionTrait>(
    db: &C,
    key_result_ids: Vec<i32>,
) -> Result<(), DbErr> {
    if key_result_ids.is_empty() {
        return Ok(());
    }

    let roadmap_ids: Vec<i32> = roadmap::Entity::find()
        .filter(roadmap::Column::KeyResultId.is_in(key_result_ids.clone()))
        .select_only()
        .column(roadmap::Column::Id)
        .into_tuple()
        .all(db)
        .await?;
    delete_roadmaps(db, roadmap_ids).await?;

    key_result::Entity::delete_many()
        .filter(key_result::Column::Id.is_in(key_result_ids))
        .exec(db)
        .await?;

    Ok(())
}

/// Key result ids of an objective.
pub async fn key_result_ids_of<C: ConnectionTrait>(
    db: &C,
    objective_id: i32,
) -> Result<Vec<i32>, DbErr> {
    key_result::Entity::find()
        .filter(key_result::Column::ObjectiveId.eq(objective_id))
        .select_only()
        .column(key_result::Column::Id)
        .into_tuple()
        .all(db)
        .await
}
