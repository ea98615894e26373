use chrono::Utc;
use common::generation::EducationalRoadmapRequest;
use sea_orm::*;
use tracing::{debug, instrument};

use super::Generated;
use crate::entity::{educational_resource, educational_roadmap};
use crate::error::AppError;
use crate::models::educational_roadmap::{
    EducationalRoadmapResponse, educational_roadmap_response,
};
use crate::models::shared::chapters_to_json;
use crate::state::AppState;
use crate::utils::lookup::find_roadmap_item;

async fn assemble<C: ConnectionTrait>(
    db: &C,
    model: educational_roadmap::Model,
) -> Result<EducationalRoadmapResponse, DbErr> {
    let resources = educational_resource::Entity::find()
        .filter(educational_resource::Column::EducationalRoadmapId.eq(model.id))
        .order_by_asc(educational_resource::Column::Position)
        .order_by_asc(educational_resource::Column::Id)
        .all(db)
        .await?;
    Ok(educational_roadmap_response(model, resources))
}

/// The educational roadmap of a roadmap item, if one exists.
pub async fn load_educational_roadmap<C: ConnectionTrait>(
    db: &C,
    roadmap_item_id: i32,
) -> Result<Option<EducationalRoadmapResponse>, AppError> {
    let Some(model) = educational_roadmap::Entity::find()
        .filter(educational_roadmap::Column::RoadmapItemId.eq(roadmap_item_id))
        .one(db)
        .await?
    else {
        return Ok(None);
    };
    Ok(Some(assemble(db, model).await?))
}

/// Return the item's educational roadmap, generating it first if absent.
#[instrument(skip(state, item_title))]
pub async fn get_or_generate_educational_roadmap(
    state: &AppState,
    roadmap_item_id: i32,
    item_title: &str,
) -> Result<Generated<EducationalRoadmapResponse>, AppError> {
    let item = find_roadmap_item(&state.db, roadmap_item_id).await?;
    if let Some(existing) = load_educational_roadmap(&state.db, item.id).await? {
        return Ok(Generated::existing(existing));
    }

    let topic = item_title.trim().to_string();
    let generated = state
        .generator
        .educational_roadmap(&EducationalRoadmapRequest {
            topic: topic.clone(),
        })
        .await?;

    let txn = state.db.begin().await?;
    let row = educational_roadmap::ActiveModel {
        roadmap_item_id: Set(item.id),
        topic: Set(topic),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let model = match row.insert(&txn).await {
        Ok(model) => model,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            txn.rollback().await?;
            debug!("Educational roadmap created concurrently; returning the existing one");
            let winner = load_educational_roadmap(&state.db, item.id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(
                        "UniqueConstraintViolation but existing educational roadmap not found"
                            .into(),
                    )
                })?;
            return Ok(Generated::existing(winner));
        }
        Err(e) => return Err(e.into()),
    };

    for (position, (kind, resource)) in generated.into_tagged().into_iter().enumerate() {
        educational_resource::ActiveModel {
            educational_roadmap_id: Set(model.id),
            kind: Set(kind.as_str().to_string()),
            title: Set(resource.title),
            description: Set(resource.description),
            url: Set(resource.url),
            author: Set(resource.author),
            duration: Set(resource.duration),
            chapters: Set(chapters_to_json(resource.chapters)),
            completed: Set(false),
            position: Set(position as i32),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    let view = assemble(&txn, model).await?;
    txn.commit().await?;

    Ok(Generated::created(view))
}
