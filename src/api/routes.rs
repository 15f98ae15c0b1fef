//! Router construction

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::api::handlers;
use crate::config::CorsConfig;
use crate::middleware::rate_limit::RateLimitLayer;
use crate::AppState;

pub const TRYON_PATH: &str = "/virtual-tryon";

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let settings = state.settings.clone();

    let mut router = Router::new()
        .route(TRYON_PATH, post(handlers::virtual_tryon))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(settings.server.max_body_bytes));

    if settings.rate_limit.enabled {
        router = router.layer(RateLimitLayer::from_config(&settings.rate_limit));
    }

    router
        .layer(cors_layer(&settings.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Permissive CORS: any origin, the configured client headers
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|name| match HeaderName::try_from(name.as_str()) {
            Ok(header) => Some(header),
            Err(_) => {
                warn!(header = %name, "Ignoring invalid CORS header name");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers(AllowHeaders::list(headers))
}
