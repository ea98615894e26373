use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "educational_trail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub roadmap_item_id: i32,
    #[sea_orm(belongs_to, from = "roadmap_item_id", to = "id")]
    pub roadmap_item: HasOne<super::roadmap_item::Entity>,

    pub topic: String,
    pub total_days: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(has_many)]
    pub steps: HasMany<super::trail_step::Entity>,

    #[sea_orm(has_many)]
    pub resources: HasMany<super::trail_resource::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
