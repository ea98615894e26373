use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trail_activity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub step_id: i32,
    #[sea_orm(belongs_to, from = "step_id", to = "id")]
    pub step: HasOne<super::trail_step::Entity>,

    pub kind: String,
    pub resource_key: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub chapters: serde_json::Value,
    pub duration: Option<String>,
    pub url: Option<String>,
    pub progress: Option<String>,
    pub completed: bool,
    pub position: i32,
}

impl ActiveModelBehavior for ActiveModel {}
