//! Request and response bodies of the content-generation service.
//!
//! Responses default every field so that a partially filled body still
//! deserializes; the server decides what an empty result means.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const KEY_RESULTS_PATH: &str = "/api/v1/key-results";
pub const ROADMAP_PATH: &str = "/api/v1/roadmap";
pub const EDUCATIONAL_ROADMAP_PATH: &str = "/api/v1/educational-roadmap";
pub const EDUCATIONAL_TRAIL_PATH: &str = "/api/v1/educational-trail";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyResultsRequest {
    pub objective: String,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyResultsResponse {
    pub objective: String,
    pub key_results: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapRequest {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_item_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapResponse {
    pub topic: String,
    pub roadmap: Vec<RoadmapSection>,
}

impl RoadmapResponse {
    pub fn item_count(&self) -> usize {
        self.roadmap.iter().map(|section| section.items.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapSection {
    pub category: String,
    pub items: Vec<RoadmapEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapEntry {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationalRoadmapRequest {
    pub topic: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationalRoadmapResponse {
    pub topic: String,
    pub books: Vec<LearningResource>,
    pub courses: Vec<LearningResource>,
    pub videos: Vec<LearningResource>,
    pub articles: Vec<LearningResource>,
    pub projects: Vec<LearningResource>,
}

impl EducationalRoadmapResponse {
    /// Resources tagged with their kind, in book, course, video, article,
    /// project order.
    pub fn into_tagged(self) -> Vec<(ResourceKind, LearningResource)> {
        let tag = |kind: ResourceKind, items: Vec<LearningResource>| {
            items.into_iter().map(move |item| (kind, item))
        };
        tag(ResourceKind::Book, self.books)
            .chain(tag(ResourceKind::Course, self.courses))
            .chain(tag(ResourceKind::Video, self.videos))
            .chain(tag(ResourceKind::Article, self.articles))
            .chain(tag(ResourceKind::Project, self.projects))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Book,
    Course,
    Video,
    Article,
    Project,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Book => "book",
            ResourceKind::Course => "course",
            ResourceKind::Video => "video",
            ResourceKind::Article => "article",
            ResourceKind::Project => "project",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningResource {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chapters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationalTrailRequest {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_days: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationalTrailResponse {
    pub topic: String,
    pub total_days: i64,
    pub description: String,
    pub steps: Vec<TrailStep>,
    pub resources: BTreeMap<String, TrailResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailStep {
    pub day: i64,
    pub title: String,
    pub description: String,
    pub activities: Vec<TrailActivity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailActivity {
    #[serde(rename = "type")]
    pub kind: String,
    pub resource_id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chapters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailResource {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chapters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
