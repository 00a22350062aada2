mod config;
mod cuisine;
mod marketplace;
mod menu;
mod model;
mod normalizer;
mod parser;
mod ranker;
mod selector;
mod server;
mod utils;

use config::{load_config, AppConfig, ConfigError};
use marketplace::{HttpMarketplace, Marketplace};
use ranker::{RandomRanker, Ranker, VertexRanker};
use server::{build_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "WHAT_TO_EAT_CONFIG";

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| "config.json".into());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(ConfigError::Io(e)) => {
            warn!("Config {} not readable ({}), using defaults", config_path, e);
            AppConfig::default()
        }
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let marketplace: Arc<dyn Marketplace> = match HttpMarketplace::new(config.marketplace.clone()) {
        Ok(m) => Arc::new(m),
        Err(e) => {
            error!("Failed to initialize marketplace client: {}", e);
            return;
        }
    };

    let ranker: Arc<dyn Ranker> = match config.ai.clone() {
        Some(ai) => match VertexRanker::new(ai) {
            Ok(r) => {
                info!("AI suggestions enabled");
                Arc::new(r)
            }
            Err(e) => {
                error!("Failed to initialize AI ranker: {}", e);
                return;
            }
        },
        None => {
            info!("No AI configured, suggestions fall back to a random pick");
            Arc::new(RandomRanker::new())
        }
    };

    info!("Selection policy: {:?}", config.selection.policy);
    let state = AppState {
        marketplace,
        ranker,
        policy: config.selection.policy,
        max_menus: config.suggestion.max_menus,
        started_at: chrono::Utc::now(),
    };
    let app = build_router(state, &config.allowed_origins);

    let listener = match TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", config.listen_addr, e);
            return;
        }
    };

    info!("Server running on {}", config.listen_addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
