use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "key_result")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub objective_id: i32,
    #[sea_orm(belongs_to, from = "objective_id", to = "id")]
    pub objective: HasOne<super::objective::Entity>,

    #[sea_orm(column_type = "Text")]
    pub title: String,
    pub completed: bool,
    /// Authoritative once set; never recomputed.
    pub expected_completion_date: Option<Date>,

    #[sea_orm(has_one)]
    pub roadmap: HasOne<super::roadmap::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
