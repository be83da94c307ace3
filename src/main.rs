use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use tracing::info;

use planner::catalog::CatalogStore;
use planner::config::PlannerConfig;
use planner::ratings::{RatingsCacheState, RatingsClient, RatingsConfig};
use planner::schedule::ScheduleStore;
use planner::server::create_router;
use planner::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.json"));
    let config = PlannerConfig::load_or_default(&config_path)
        .map_err(|e| anyhow!("Failed to load {}: {}", config_path.display(), e))?;

    let catalog = load_catalog(&config)?;

    let ratings_config = RatingsConfig {
        school_name: config.ratings.school_name.clone(),
        ..RatingsConfig::default()
    };
    let cache_state = Arc::new(RatingsCacheState {
        searches: planner::ratings::TtlCache::new(Duration::from_secs(config.ratings.cache_ttl_secs)),
        details: planner::ratings::TtlCache::new(Duration::from_secs(config.ratings.cache_ttl_secs)),
        circuit_breaker: planner::ratings::CircuitBreaker::with_defaults(),
    });
    let ratings = RatingsClient::with_config(ratings_config, cache_state)
        .context("Failed to build ratings client")?;

    let addr: SocketAddr = format!("{}:{}", config.server.address, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = Arc::new(AppState {
        config,
        catalog,
        schedule: ScheduleStore::new(),
        ratings,
    });

    let app = create_router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind listener")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

fn load_catalog(config: &PlannerConfig) -> anyhow::Result<CatalogStore> {
    let catalog = if let Some(dir) = &config.catalog.data_dir {
        CatalogStore::load_from_directory(Path::new(dir))
    } else {
        CatalogStore::load_from_files(&config.catalog.files)
    }
    .context("Failed to load course catalog")?;

    Ok(catalog)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
