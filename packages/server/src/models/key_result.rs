use chrono::{DateTime, NaiveDate, Utc};
use common::schedule::ScheduledDate;
use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_text};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateKeyResultRequest {
    pub objective_id: i32,
    #[schema(example = "Run 10k under an hour")]
    pub title: String,
    /// Explicit date, `YYYY-MM-DD`. Without it the date is computed on read.
    pub expected_completion_date: Option<NaiveDate>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateKeyResultRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
    /// `null` clears the explicit date.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub expected_completion_date: Option<Option<NaiveDate>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct KeyResultResponse {
    pub id: i32,
    pub objective_id: i32,
    pub title: String,
    pub completed: bool,
    pub expected_completion_date: Option<NaiveDate>,
    /// True when the date was computed from the objective's date.
    pub is_estimated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KeyResultResponse {
    pub fn with_schedule(mut self, scheduled: ScheduledDate) -> Self {
        self.expected_completion_date = scheduled.date;
        self.is_estimated = scheduled.estimated;
        self
    }
}

impl From<crate::entity::key_result::Model> for KeyResultResponse {
    fn from(m: crate::entity::key_result::Model) -> Self {
        Self {
            id: m.id,
            objective_id: m.objective_id,
            title: m.title,
            completed: m.completed,
            expected_completion_date: m.expected_completion_date,
            is_estimated: false,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_key_result(req: &CreateKeyResultRequest) -> Result<(), AppError> {
    validate_text("Title", &req.title)
}

pub fn validate_update_key_result(req: &UpdateKeyResultRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_text("Title", title)?;
    }
    Ok(())
}
