use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::generation::{ContentGenerator, UrlChecker};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub generator: Arc<dyn ContentGenerator>,
    pub url_checker: Arc<dyn UrlChecker>,
}
