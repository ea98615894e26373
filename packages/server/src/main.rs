use std::sync::Arc;

use anyhow::Context;
use tracing::{Level, info};

use conquista_server::config::AppConfig;
use conquista_server::database::init_db;
use conquista_server::generation::{HttpContentGenerator, HttpUrlChecker};
use conquista_server::seed::{ensure_indexes, seed_categories};
use conquista_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    seed_categories(&db)
        .await
        .context("Failed to seed categories")?;
    ensure_indexes(&db).await.context("Failed to ensure indexes")?;

    let generator =
        HttpContentGenerator::new(&config.generation).context("Failed to build generation client")?;
    let url_checker = HttpUrlChecker::new().context("Failed to build URL checker")?;
    info!(base_url = %config.generation.base_url, "Generation service configured");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        config: Arc::new(config),
        generator: Arc::new(generator),
        url_checker: Arc::new(url_checker),
    };
    let app = conquista_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
