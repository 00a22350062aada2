//! HTTP surface: routing, CORS and shared per-process handles.

mod error;
mod routes;

pub use error::ApiError;

use crate::marketplace::Marketplace;
use crate::ranker::Ranker;
use crate::selector::SelectionPolicy;

use axum::Router;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, LINK};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared application state. Holds only immutable handles; requests never share data.
#[derive(Clone)]
pub struct AppState {
    pub marketplace: Arc<dyn Marketplace>,
    pub ranker: Arc<dyn Ranker>,
    pub policy: SelectionPolicy,
    pub max_menus: usize,
    pub started_at: DateTime<Utc>,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([ACCEPT, AUTHORIZATION, CONTENT_TYPE])
        .expose_headers([LINK])
        .allow_credentials(true)
        .max_age(Duration::from_secs(300))
}

/// Build the application router
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/picker/random", get(routes::random_restaurant))
        .route("/picker/ai/filter-categories", post(routes::filter_categories))
        .route("/picker/ai/suggestion", post(routes::suggestion))
        .route("/restaurants/menu", get(routes::restaurant_menu))
        .route("/cuisines", get(routes::cuisines));

    Router::new()
        .route("/health", get(routes::health))
        .nest("/api/v1", api)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
