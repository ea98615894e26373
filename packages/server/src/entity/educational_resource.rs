use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "educational_resource")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub educational_roadmap_id: i32,
    #[sea_orm(belongs_to, from = "educational_roadmap_id", to = "id")]
    pub educational_roadmap: HasOne<super::educational_roadmap::Entity>,

    /// One of: book, course, video, article, project
    pub kind: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub url: Option<String>,
    pub author: Option<String>,
    pub duration: Option<String>,
    /// JSON array of chapter titles.
    #[sea_orm(column_type = "JsonBinary")]
    pub chapters: serde_json::Value,
    pub completed: bool,
    pub position: i32,
}

impl ActiveModelBehavior for ActiveModel {}
