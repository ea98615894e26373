use chrono::{DateTime, NaiveDate, Utc};
use common::generation::EducationalTrailResponse as GeneratedTrail;
use common::schedule::BudgetSource;
use serde::{Deserialize, Serialize};

use super::shared::{chapters_from_json, validate_text};
use crate::entity::{educational_trail, trail_activity, trail_resource, trail_step};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateEducationalTrailRequest {
    pub roadmap_item_id: i32,
    /// Topic sent to the generator.
    pub item_title: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct DraftTrailRequest {
    #[schema(example = "Async Rust")]
    pub topic: String,
    /// Optional target date, `YYYY-MM-DD`.
    pub target_date: Option<NaiveDate>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TrailActivityResponse {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub resource_id: String,
    pub title: String,
    pub description: String,
    pub chapters: Vec<String>,
    pub duration: Option<String>,
    pub url: Option<String>,
    pub progress: Option<String>,
    pub completed: bool,
    pub position: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TrailStepResponse {
    pub id: i32,
    pub day: i32,
    pub title: String,
    pub description: String,
    pub activities: Vec<TrailActivityResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TrailResourceResponse {
    pub id: i32,
    pub resource_id: String,
    pub title: String,
    pub description: String,
    pub author: Option<String>,
    pub duration: Option<String>,
    pub url: Option<String>,
    pub chapters: Vec<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EducationalTrailResponse {
    pub id: i32,
    pub roadmap_item_id: i32,
    pub topic: String,
    pub total_days: i32,
    pub description: String,
    pub steps: Vec<TrailStepResponse>,
    pub resources: Vec<TrailResourceResponse>,
    pub created_at: DateTime<Utc>,
}

/// A generated trail that was not persisted.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DraftTrailResponse {
    /// Day budget sent to the generator.
    pub available_days: i64,
    #[schema(value_type = String, example = "fallback")]
    pub budget_source: BudgetSource,
    #[schema(value_type = Object)]
    pub trail: GeneratedTrail,
}

impl From<trail_activity::Model> for TrailActivityResponse {
    fn from(m: trail_activity::Model) -> Self {
        Self {
            id: m.id,
            kind: m.kind,
            resource_id: m.resource_key,
            title: m.title,
            description: m.description,
            chapters: chapters_from_json(m.chapters),
            duration: m.duration,
            url: m.url,
            progress: m.progress,
            completed: m.completed,
            position: m.position,
        }
    }
}

impl From<trail_resource::Model> for TrailResourceResponse {
    fn from(m: trail_resource::Model) -> Self {
        Self {
            id: m.id,
            resource_id: m.resource_key,
            title: m.title,
            description: m.description,
            author: m.author,
            duration: m.duration,
            url: m.url,
            chapters: chapters_from_json(m.chapters),
        }
    }
}

/// Assemble the nested view from ordered steps and activities.
pub fn educational_trail_response(
    m: educational_trail::Model,
    steps: Vec<trail_step::Model>,
    activities: Vec<trail_activity::Model>,
    resources: Vec<trail_resource::Model>,
) -> EducationalTrailResponse {
    let mut step_views: Vec<TrailStepResponse> = steps
        .into_iter()
        .map(|s| TrailStepResponse {
            id: s.id,
            day: s.day,
            title: s.title,
            description: s.description,
            activities: Vec::new(),
        })
        .collect();

    for activity in activities {
        if let Some(step) = step_views.iter_mut().find(|s| s.id == activity.step_id) {
            step.activities.push(activity.into());
        }
    }

    EducationalTrailResponse {
        id: m.id,
        roadmap_item_id: m.roadmap_item_id,
        topic: m.topic,
        total_days: m.total_days,
        description: m.description,
        steps: step_views,
        resources: resources.into_iter().map(Into::into).collect(),
        created_at: m.created_at,
    }
}

pub fn validate_create_educational_trail(
    req: &CreateEducationalTrailRequest,
) -> Result<(), AppError> {
    validate_text("Item title", &req.item_title)
}

pub fn validate_draft_trail(req: &DraftTrailRequest) -> Result<(), AppError> {
    validate_text("Topic", &req.topic)
}
