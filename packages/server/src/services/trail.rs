use std::collections::HashMap;

use chrono::Utc;
use common::generation::{EducationalTrailRequest, EducationalTrailResponse as GeneratedTrail};
use sea_orm::*;
use tracing::{debug, info, instrument};

use super::Generated;
use super::budget::{BudgetPlanner, DbScheduleStore, standalone_trail_budget};
use super::cascade::delete_trails;
use crate::entity::{educational_trail, trail_activity, trail_resource, trail_step};
use crate::error::AppError;
use crate::generation::UrlChecker;
use crate::generation::url::retain_reachable;
use crate::models::educational_trail::{
    DraftTrailResponse, EducationalTrailResponse, educational_trail_response,
};
use crate::models::shared::chapters_to_json;
use crate::state::AppState;
use crate::utils::lookup::find_roadmap_item;

/// Drop malformed or unreachable URLs from a generated trail. Each distinct
/// URL is checked once.
pub async fn strip_unreachable_urls(checker: &dyn UrlChecker, trail: &mut GeneratedTrail) {
    let mut verdicts: HashMap<String, Option<String>> = HashMap::new();

    async fn check(
        checker: &dyn UrlChecker,
        verdicts: &mut HashMap<String, Option<String>>,
        url: Option<String>,
        context: &str,
    ) -> Option<String> {
        let url = url?;
        if let Some(verdict) = verdicts.get(&url) {
            return verdict.clone();
        }
        let verdict = retain_reachable(checker, Some(url.clone()), context).await;
        verdicts.insert(url, verdict.clone());
        verdict
    }

    for resource in trail.resources.values_mut() {
        resource.url = check(checker, &mut verdicts, resource.url.take(), "trail resource").await;
    }
    for step in &mut trail.steps {
        for activity in &mut step.activities {
            activity.url =
                check(checker, &mut verdicts, activity.url.take(), "trail activity").await;
        }
    }
}

async fn assemble<C: ConnectionTrait>(
    db: &C,
    model: educational_trail::Model,
) -> Result<EducationalTrailResponse, DbErr> {
    let steps = trail_step::Entity::find()
        .filter(trail_step::Column::TrailId.eq(model.id))
        .order_by_asc(trail_step::Column::Day)
        .order_by_asc(trail_step::Column::Id)
        .all(db)
        .await?;

    let step_ids: Vec<i32> = steps.iter().map(|s| s.id).collect();
    let activities = if step_ids.is_empty() {
        Vec::new()
    } else {
        trail_activity::Entity::find()
            .filter(trail_activity::Column::StepId.is_in(step_ids))
            .order_by_asc(trail_activity::Column::Position)
            .order_by_asc(trail_activity::Column::Id)
            .all(db)
            .await?
    };

    let resources = trail_resource::Entity::find()
        .filter(trail_resource::Column::TrailId.eq(model.id))
        .order_by_asc(trail_resource::Column::ResourceKey)
        .all(db)
        .await?;

    Ok(educational_trail_response(model, steps, activities, resources))
}

/// The trail of a roadmap item, if one exists.
pub async fn load_trail<C: ConnectionTrait>(
    db: &C,
    roadmap_item_id: i32,
) -> Result<Option<EducationalTrailResponse>, AppError> {
    let Some(model) = educational_trail::Entity::find()
        .filter(educational_trail::Column::RoadmapItemId.eq(roadmap_item_id))
        .one(db)
        .await?
    else {
        return Ok(None);
    };
    Ok(Some(assemble(db, model).await?))
}

async fn generate(
    state: &AppState,
    topic: String,
    available_days: i64,
) -> Result<GeneratedTrail, AppError> {
    let request = EducationalTrailRequest {
        topic,
        available_days: Some(available_days),
    };
    let mut trail = state.generator.educational_trail(&request).await?;
    if state.config.generation.validate_urls {
        strip_unreachable_urls(state.url_checker.as_ref(), &mut trail).await;
    }
    Ok(trail)
}

/// Return the item's trail, generating it first if absent.
#[instrument(skip(state, item_title))]
pub async fn get_or_generate_trail(
    state: &AppState,
    roadmap_item_id: i32,
    item_title: &str,
) -> Result<Generated<EducationalTrailResponse>, AppError> {
    let item = find_roadmap_item(&state.db, roadmap_item_id).await?;
    if let Some(existing) = load_trail(&state.db, item.id).await? {
        return Ok(Generated::existing(existing));
    }

    let now = Utc::now();
    let planner = BudgetPlanner::new(DbScheduleStore::new(&state.db));
    let budget = planner.item_trail_budget(item.id, now).await?;

    let topic = item_title.trim().to_string();
    let generated = generate(state, topic.clone(), budget.days).await?;
    let total_days = if generated.total_days > 0 {
        generated.total_days
    } else {
        budget.days
    };

    let txn = state.db.begin().await?;
    let row = educational_trail::ActiveModel {
        roadmap_item_id: Set(item.id),
        topic: Set(topic),
        total_days: Set(i32::try_from(total_days).unwrap_or(i32::MAX)),
        description: Set(generated.description),
        created_at: Set(now),
        ..Default::default()
    };
    let model = match row.insert(&txn).await {
        Ok(model) => model,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            txn.rollback().await?;
            debug!("Trail created concurrently; returning the existing one");
            let winner = load_trail(&state.db, item.id).await?.ok_or_else(|| {
                AppError::Internal("UniqueConstraintViolation but existing trail not found".into())
            })?;
            return Ok(Generated::existing(winner));
        }
        Err(e) => return Err(e.into()),
    };

    for (key, resource) in generated.resources {
        trail_resource::ActiveModel {
            trail_id: Set(model.id),
            resource_key: Set(key),
            title: Set(resource.title),
            description: Set(resource.description),
            author: Set(resource.author),
            duration: Set(resource.duration),
            url: Set(resource.url),
            chapters: Set(chapters_to_json(resource.chapters)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    for step in generated.steps {
        let step_model = trail_step::ActiveModel {
            trail_id: Set(model.id),
            day: Set(i32::try_from(step.day).unwrap_or(i32::MAX)),
            title: Set(step.title),
            description: Set(step.description),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for (position, activity) in step.activities.into_iter().enumerate() {
            trail_activity::ActiveModel {
                step_id: Set(step_model.id),
                kind: Set(activity.kind),
                resource_key: Set(activity.resource_id),
                title: Set(activity.title),
                description: Set(activity.description),
                chapters: Set(chapters_to_json(activity.chapters)),
                duration: Set(activity.duration),
                url: Set(activity.url),
                progress: Set(activity.progress),
                completed: Set(false),
                position: Set(position as i32),
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

/// Generate a trail for a bare topic without persisting it.
#[instrument(skip(state, topic))]
pub async fn draft_trail(
    state: &AppState,
    topic: &str,
    target_date: Option<chrono::NaiveDate>,
) -> Result<DraftTrailResponse, AppError> {
    let budget = standalone_trail_budget(target_date, Utc::now());
    let trail = generate(state, topic.trim().to_string(), budget.days).await?;

    Ok(DraftTrailResponse {
        available_days: budget.days,
        budget_source: budget.source,
        trail,
    })
}

/// Delete the trail of a roadmap item. NotFound when it has none.
#[instrument(skip(state))]
pub async fn delete_trail(state: &AppState, roadmap_item_id: i32) -> Result<(), AppError> {
    let txn = state.db.begin().await?;
    let trail_id: i32 = educational_trail::Entity::find()
        .filter(educational_trail::Column::RoadmapItemId.eq(roadmap_item_id))
        .select_only()
        .column(educational_trail::Column::Id)
        .into_tuple()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Educational trail not found".into()))?;

    delete_trails(&txn, vec![trail_id]).await?;
    txn.commit().await?;

    info!(roadmap_item_id, trail_id, "Deleted educational trail");
    Ok(())
}
