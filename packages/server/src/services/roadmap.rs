use chrono::Utc;
use common::generation::RoadmapRequest;
use sea_orm::*;
use tracing::{debug, instrument, warn};

use super::Generated;
use super::budget::{BudgetPlanner, DbScheduleStore, RoadmapBudget};
use crate::entity::{roadmap, roadmap_category, roadmap_item};
use crate::error::AppError;
use crate::models::roadmap::{RoadmapResponse, roadmap_response};
use crate::state::AppState;
use crate::utils::lookup::find_key_result;

async fn assemble<C: ConnectionTrait>(
    db: &C,
    model: roadmap::Model,
) -> Result<RoadmapResponse, DbErr> {
    let categories = roadmap_category::Entity::find()
        .filter(roadmap_category::Column::RoadmapId.eq(model.id))
        .order_by_asc(roadmap_category::Column::Position)
        .order_by_asc(roadmap_category::Column::Id)
        .all(db)
        .await?;

    let category_ids: Vec<i32> = categories.iter().map(|c| c.id).collect();
    let items = if category_ids.is_empty() {
        Vec::new()
    } else {
        roadmap_item::Entity::find()
            .filter(roadmap_item::Column::CategoryId.is_in(category_ids))
            .order_by_asc(roadmap_item::Column::Position)
            .order_by_asc(roadmap_item::Column::Id)
            .all(db)
            .await?
    };

    Ok(roadmap_response(model, categories, items))
}

/// The roadmap of a key result, if one exists.
pub async fn load_roadmap<C: ConnectionTrait>(
    db: &C,
    key_result_id: i32,
) -> Result<Option<RoadmapResponse>, AppError> {
    let Some(model) = roadmap::Entity::find()
        .filter(roadmap::Column::KeyResultId.eq(key_result_id))
        .one(db)
        .await?
    else {
        return Ok(None);
    };
    Ok(Some(assemble(db, model).await?))
}

/// Return the key result's roadmap, generating and persisting it first if absent.
#[instrument(skip(state))]
pub async fn get_or_generate_roadmap(
    state: &AppState,
    key_result_id: i32,
) -> Result<Generated<RoadmapResponse>, AppError> {
    let kr = find_key_result(&state.db, key_result_id).await?;
    if let Some(existing) = load_roadmap(&state.db, kr.id).await? {
        return Ok(Generated::existing(existing));
    }

    let now = Utc::now();
    let planner = BudgetPlanner::new(DbScheduleStore::new(&state.db));
    let RoadmapBudget { budget, plan } = planner.roadmap_budget(kr.id, now).await?;

    let request = RoadmapRequest {
        topic: kr.title.clone(),
        available_days: Some(budget.days),
        exact_item_count: Some(plan.exact_item_count),
    };
    let generated = state.generator.roadmap(&request).await?;

    let returned = generated.item_count();
    if i64::try_from(returned).ok() != Some(plan.exact_item_count) {
        warn!(
            key_result_id,
            requested = plan.exact_item_count,
            returned,
            "Generator did not honor the item-count hint"
        );
    }

    let txn = state.db.begin().await?;
    let row = roadmap::ActiveModel {
        key_result_id: Set(kr.id),
        topic: Set(kr.title),
        available_days: Set(i32::try_from(budget.days).unwrap_or(i32::MAX)),
        requested_item_count: Set(i32::try_from(plan.exact_item_count).unwrap_or(i32::MAX)),
        created_at: Set(now),
        ..Default::default()
    };
    let model = match row.insert(&txn).await {
        Ok(model) => model,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            txn.rollback().await?;
            debug!("Roadmap created concurrently; returning the existing one");
            let winner = load_roadmap(&state.db, key_result_id).await?.ok_or_else(|| {
                AppError::Internal("UniqueConstraintViolation but existing roadmap not found".into())
            })?;
            return Ok(Generated::existing(winner));
        }
        Err(e) => return Err(e.into()),
    };

    for (category_pos, section) in generated.roadmap.into_iter().enumerate() {
        let category = roadmap_category::ActiveModel {
            roadmap_id: Set(model.id),
            name: Set(section.category),
            position: Set(category_pos as i32),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for (item_pos, entry) in section.items.into_iter().enumerate() {
            roadmap_item::ActiveModel {
                category_id: Set(category.id),
                title: Set(entry.title),
                completed: Set(entry.completed),
                position: Set(item_pos as i32),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
    }

    let view = assemble(&txn, model).await?;
    txn.commit().await?;

    Ok(Generated::created(view))
}
