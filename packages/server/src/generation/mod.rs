//! Client side of the content-generation service.

mod client;
pub mod url;

pub use client::HttpContentGenerator;
pub use url::{HttpUrlChecker, UrlChecker};

use async_trait::async_trait;
use common::generation::{
    EducationalRoadmapRequest, EducationalRoadmapResponse, EducationalTrailRequest,
    EducationalTrailResponse, KeyResultsRequest, KeyResultsResponse, RoadmapRequest,
    RoadmapResponse,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Request(String),

    #[error("generation service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generation request timed out")]
    Timeout,

    #[error("failed to decode generation response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout
        } else if err.is_decode() {
            GenerationError::Decode(err.to_string())
        } else {
            GenerationError::Request(err.to_string())
        }
    }
}

/// Produces generative content. One call per request, no retry.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn key_results(
        &self,
        request: &KeyResultsRequest,
    ) -> Result<KeyResultsResponse, GenerationError>;

    async fn roadmap(&self, request: &RoadmapRequest) -> Result<RoadmapResponse, GenerationError>;

    async fn educational_roadmap(
        &self,
        request: &EducationalRoadmapRequest,
    ) -> Result<EducationalRoadmapResponse, GenerationError>;

    async fn educational_trail(
        &self,
        request: &EducationalTrailRequest,
    ) -> Result<EducationalTrailResponse, GenerationError>;
}
