use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roadmap_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub roadmap_id: i32,
    #[sea_orm(belongs_to, from = "roadmap_id", to = "id")]
    pub roadmap: HasOne<super::roadmap::Entity>,

    pub name: String,
    pub position: i32,

    #[sea_orm(has_many)]
    pub items: HasMany<super::roadmap_item::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
