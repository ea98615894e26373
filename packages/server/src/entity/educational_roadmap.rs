use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "educational_roadmap")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub roadmap_item_id: i32,
    #[sea_orm(belongs_to, from = "roadmap_item_id", to = "id")]
    pub roadmap_item: HasOne<super::roadmap_item::Entity>,

    pub topic: String,

    #[sea_orm(has_many)]
    pub resources: HasMany<super::educational_resource::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
