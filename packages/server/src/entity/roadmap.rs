use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roadmap")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub key_result_id: i32,
    #[sea_orm(belongs_to, from = "key_result_id", to = "id")]
    pub key_result: HasOne<super::key_result::Entity>,

    pub topic: String,
    /// Day budget the roadmap was generated with.
    pub available_days: i32,
    /// Item-count hint sent to the generator.
    pub requested_item_count: i32,

    #[sea_orm(has_many)]
    pub categories: HasMany<super::roadmap_category::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
