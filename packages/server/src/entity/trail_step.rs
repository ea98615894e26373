use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trail_step")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub trail_id: i32,
    #[sea_orm(belongs_to, from = "trail_id", to = "id")]
    pub trail: HasOne<super::educational_trail::Entity>,

    /// 1-based day number within the trail.
    pub day: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(has_many)]
    pub activities: HasMany<super::trail_activity::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
