use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{chapters_from_json, validate_text};
use crate::entity::{educational_resource, educational_roadmap};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateEducationalRoadmapRequest {
    pub roadmap_item_id: i32,
    /// Topic sent to the generator.
    #[schema(example = "Ownership and borrowing")]
    pub item_title: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EducationalResourceResponse {
    pub id: i32,
    /// One of: book, course, video, article, project
    pub kind: String,
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub author: Option<String>,
    pub duration: Option<String>,
    pub chapters: Vec<String>,
    pub completed: bool,
    pub position: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EducationalRoadmapResponse {
    pub id: i32,
    pub roadmap_item_id: i32,
    pub topic: String,
    pub books: Vec<EducationalResourceResponse>,
    pub courses: Vec<EducationalResourceResponse>,
    pub videos: Vec<EducationalResourceResponse>,
    pub articles: Vec<EducationalResourceResponse>,
    pub projects: Vec<EducationalResourceResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<educational_resource::Model> for EducationalResourceResponse {
    fn from(m: educational_resource::Model) -> Self {
        Self {
            id: m.id,
            kind: m.kind,
            title: m.title,
            description: m.description,
            url: m.url,
            author: m.author,
            duration: m.duration,
            chapters: chapters_from_json(m.chapters),
            completed: m.completed,
            position: m.position,
        }
    }
}

/// Group ordered resources by kind.
pub fn educational_roadmap_response(
    m: educational_roadmap::Model,
    resources: Vec<educational_resource::Model>,
) -> EducationalRoadmapResponse {
    let mut response = EducationalRoadmapResponse {
        id: m.id,
        roadmap_item_id: m.roadmap_item_id,
        topic: m.topic,
        books: Vec::new(),
        courses: Vec::new(),
        videos: Vec::new(),
        articles: Vec::new(),
        projects: Vec::new(),
        created_at: m.created_at,
    };

    for resource in resources {
        let bucket = match resource.kind.as_str() {
            "book" => &mut response.books,
            "course" => &mut response.courses,
            "video" => &mut response.videos,
            "article" => &mut response.articles,
            _ => &mut response.projects,
        };
        bucket.push(resource.into());
    }

    response
}

pub fn validate_create_educational_roadmap(
    req: &CreateEducationalRoadmapRequest,
) -> Result<(), AppError> {
    validate_text("Item title", &req.item_title)
}
