use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_text};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateObjectiveRequest {
    #[schema(example = "Run a marathon")]
    pub objective: String,
    #[schema(example = 1)]
    pub category_id: i32,
    /// Target date, `YYYY-MM-DD`.
    pub completion_date: Option<NaiveDate>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateObjectiveRequest {
    pub objective: Option<String>,
    pub category_id: Option<i32>,
    /// `null` clears the date.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub completion_date: Option<Option<NaiveDate>>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ObjectiveListQuery {
    /// Only objectives of this category.
    pub category_id: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ObjectiveResponse {
    pub id: i32,
    pub objective: String,
    pub category_id: i32,
    pub completion_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::objective::Model> for ObjectiveResponse {
    fn from(m: crate::entity::objective::Model) -> Self {
        Self {
            id: m.id,
            objective: m.objective,
            category_id: m.category_id,
            completion_date: m.completion_date,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_objective(req: &CreateObjectiveRequest) -> Result<(), AppError> {
    validate_text("Objective", &req.objective)
}

pub fn validate_update_objective(req: &UpdateObjectiveRequest) -> Result<(), AppError> {
    if let Some(ref objective) = req.objective {
        validate_text("Objective", objective)?;
    }
    Ok(())
}
