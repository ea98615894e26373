use chrono::{DateTime, Utc};
use common::generation::KeyResultsRequest;
use sea_orm::*;
use tracing::{info, instrument};

use super::budget::{KeyResultRef, schedule_key_results};
use crate::entity::{key_result, objective};
use crate::error::AppError;
use crate::models::key_result::KeyResultResponse;
use crate::state::AppState;
use crate::utils::lookup::{find_objective, find_objective_for_update};

/// Key Results of an objective in creation order, with undated ones given a
/// date spread up to the objective's deadline.
pub async fn scheduled_key_results<C: ConnectionTrait>(
    db: &C,
    objective: &objective::Model,
    now: DateTime<Utc>,
) -> Result<Vec<KeyResultResponse>, AppError> {
    let rows = key_result::Entity::find()
        .filter(key_result::Column::ObjectiveId.eq(objective.id))
        .order_by_asc(key_result::Column::CreatedAt)
        .order_by_asc(key_result::Column::Id)
        .all(db)
        .await?;

    let refs: Vec<KeyResultRef> = rows.iter().map(KeyResultRef::from).collect();
    let schedule = schedule_key_results(objective.completion_date, &refs, now);

    Ok(rows
        .into_iter()
        .zip(schedule)
        .map(|(m, scheduled)| KeyResultResponse::from(m).with_schedule(scheduled))
        .collect())
}

/// Generate a batch of Key Results for an objective. They are stored undated;
/// the returned dates are computed the same way as on listing.
#[instrument(skip(state))]
pub async fn generate_key_results(
    state: &AppState,
    objective_id: i32,
) -> Result<Vec<KeyResultResponse>, AppError> {
    let objective = find_objective(&state.db, objective_id).await?;

    let request = KeyResultsRequest {
        objective: objective.objective.clone(),
        count: state.config.generation.key_result_count,
        completion_date: objective.completion_date,
    };
    let generated = state.generator.key_results(&request).await?;

    let titles: Vec<String> = generated
        .key_results
        .into_iter()
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .collect();
    if titles.is_empty() {
        return Err(AppError::GenerationFailed(
            "Generator returned no key results".into(),
        ));
    }

    let now = Utc::now();
    let txn = state.db.begin().await?;
    // Re-read under lock: the deadline may have changed during generation.
    let objective = find_objective_for_update(&txn, objective_id).await?;

    let mut created_ids = Vec::with_capacity(titles.len());
    for title in titles {
        let model = key_result::ActiveModel {
            objective_id: Set(objective_id),
            title: Set(title),
            completed: Set(false),
            expected_completion_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        created_ids.push(model.id);
    }

    let created: Vec<KeyResultResponse> = scheduled_key_results(&txn, &objective, now)
        .await?
        .into_iter()
        .filter(|kr| created_ids.contains(&kr.id))
        .collect();
    txn.commit().await?;

    info!(objective_id, count = created.len(), "Generated key results");
    Ok(created)
}
