use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roadmap_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub category_id: i32,
    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: HasOne<super::roadmap_category::Entity>,

    #[sea_orm(column_type = "Text")]
    pub title: String,
    pub completed: bool,
    pub position: i32,

    #[sea_orm(has_one)]
    pub educational_roadmap: HasOne<super::educational_roadmap::Entity>,

    #[sea_orm(has_one)]
    pub educational_trail: HasOne<super::educational_trail::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
