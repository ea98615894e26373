use std::time::Duration;

use async_trait::async_trait;
use common::generation::{
    EDUCATIONAL_ROADMAP_PATH, EDUCATIONAL_TRAIL_PATH, EducationalRoadmapRequest,
    EducationalRoadmapResponse, EducationalTrailRequest, EducationalTrailResponse,
    KEY_RESULTS_PATH, KeyResultsRequest, KeyResultsResponse, ROADMAP_PATH, RoadmapRequest,
    RoadmapResponse,
};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ContentGenerator, GenerationError};
use crate::config::GenerationConfig;

/// Talks to the generation service over HTTP.
pub struct HttpContentGenerator {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    trail_timeout: Duration,
}

impl HttpContentGenerator {
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout(),
            trail_timeout: config.trail_timeout(),
        })
    }

    async fn post<Req, Resp>(
        &self,
        path: &str,
        body: &Req,
        timeout: Duration,
    ) -> Result<Resp, GenerationError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Calling generation service");

        let response = self
            .client
            .post(&url)
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "Generation service rejected request");
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| GenerationError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ContentGenerator for HttpContentGenerator {
    async fn key_results(
        &self,
        request: &KeyResultsRequest,
    ) -> Result<KeyResultsResponse, GenerationError> {
        self.post(KEY_RESULTS_PATH, request, self.request_timeout)
            .await
    }

    async fn roadmap(&self, request: &RoadmapRequest) -> Result<RoadmapResponse, GenerationError> {
        self.post(ROADMAP_PATH, request, self.request_timeout).await
    }

    async fn educational_roadmap(
        &self,
        request: &EducationalRoadmapRequest,
    ) -> Result<EducationalRoadmapResponse, GenerationError> {
        self.post(EDUCATIONAL_ROADMAP_PATH, request, self.request_timeout)
            .await
    }

    async fn educational_trail(
        &self,
        request: &EducationalTrailRequest,
    ) -> Result<EducationalTrailResponse, GenerationError> {
        self.post(EDUCATIONAL_TRAIL_PATH, request, self.trail_timeout)
            .await
    }
}
