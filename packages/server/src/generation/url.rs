use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url, redirect};
use tracing::{debug, warn};

use super::GenerationError;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; ConquistaAI/1.0)";
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_REDIRECTS: usize = 3;

/// An absolute http(s) URL with a host.
pub fn is_well_formed(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

#[async_trait]
pub trait UrlChecker: Send + Sync {
    async fn is_reachable(&self, url: &str) -> bool;
}

/// Checks reachability with a HEAD request; any 2xx or 3xx answer counts.
pub struct HttpUrlChecker {
    client: Client,
}

impl HttpUrlChecker {
    pub fn new() -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(CHECK_TIMEOUT)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UrlChecker for HttpUrlChecker {
    async fn is_reachable(&self, url: &str) -> bool {
        if !is_well_formed(url) {
            return false;
        }
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status();
                status.is_success() || status.is_redirection()
            }
            Err(e) => {
                debug!(url, error = %e, "URL check failed");
                false
            }
        }
    }
}

/// Keep `url` only if it is well formed and reachable. Dropped URLs are logged.
pub async fn retain_reachable(
    checker: &dyn UrlChecker,
    url: Option<String>,
    context: &str,
) -> Option<String> {
    let url = url.filter(|u| !u.trim().is_empty())?;
    if !is_well_formed(&url) {
        warn!(%url, context, "Dropping malformed URL");
        return None;
    }
    if !checker.is_reachable(&url).await {
        warn!(%url, context, "Dropping unreachable URL");
        return None;
    }
    Some(url)
}
