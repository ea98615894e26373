use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// `["*"]` allows any origin without credentials.
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Content-generation service settings.
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    pub base_url: String,
    /// Timeout for key-result, roadmap and educational-roadmap requests.
    pub request_timeout_secs: u64,
    /// Timeout for educational-trail requests, which take minutes.
    pub trail_timeout_secs: u64,
    /// Number of Key Results requested per batch.
    pub key_result_count: u32,
    /// Check trail URLs for reachability before persisting them.
    pub validate_urls: bool,
}

impl GenerationConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn trail_timeout(&self) -> Duration {
        Duration::from_secs(self.trail_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub generation: GenerationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.cors.allow_origins", vec!["*"])?
            .set_default("server.cors.max_age", 3600)?
            .set_default("generation.request_timeout_secs", 60)?
            .set_default("generation.trail_timeout_secs", 180)?
            .set_default("generation.key_result_count", 5)?
            .set_default("generation.validate_urls", true)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CONQUISTA__DATABASE__URL)
            .add_source(
                Environment::with_prefix("CONQUISTA")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
