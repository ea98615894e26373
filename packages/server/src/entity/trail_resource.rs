use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trail_resource")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub trail_id: i32,
    #[sea_orm(belongs_to, from = "trail_id", to = "id")]
    pub trail: HasOne<super::educational_trail::Entity>,

    /// Key the trail's activities use to reference this resource.
    pub resource_key: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub author: Option<String>,
    pub duration: Option<String>,
    pub url: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub chapters: serde_json::Value,
}

impl ActiveModelBehavior for ActiveModel {}
