use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::{roadmap, roadmap_category, roadmap_item};

#[derive(Serialize, utoipa::ToSchema)]
pub struct RoadmapItemResponse {
    pub id: i32,
    pub title: String,
    pub completed: bool,
    pub position: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RoadmapCategoryResponse {
    pub id: i32,
    pub name: String,
    pub position: i32,
    pub items: Vec<RoadmapItemResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RoadmapResponse {
    pub id: i32,
    pub key_result_id: i32,
    pub topic: String,
    /// Day budget the roadmap was generated with.
    pub available_days: i32,
    /// Item-count hint sent to the generator.
    pub requested_item_count: i32,
    pub categories: Vec<RoadmapCategoryResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<roadmap_item::Model> for RoadmapItemResponse {
    fn from(m: roadmap_item::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            completed: m.completed,
            position: m.position,
        }
    }
}

/// Assemble the nested view. `items` must belong to `categories`; both ordered.
pub fn roadmap_response(
    m: roadmap::Model,
    categories: Vec<roadmap_category::Model>,
    items: Vec<roadmap_item::Model>,
) -> RoadmapResponse {
    let mut sections: Vec<RoadmapCategoryResponse> = categories
        .into_iter()
        .map(|c| RoadmapCategoryResponse {
            id: c.id,
            name: c.name,
            position: c.position,
            items: Vec::new(),
        })
        .collect();

    for item in items {
        if let Some(section) = sections.iter_mut().find(|s| s.id == item.category_id) {
            section.items.push(item.into());
        }
    }

    RoadmapResponse {
        id: m.id,
        key_result_id: m.key_result_id,
        topic: m.topic,
        available_days: m.available_days,
        requested_item_count: m.requested_item_count,
        categories: sections,
        created_at: m.created_at,
    }
}
