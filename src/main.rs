//! Main entry point for the Virtual Try-On Gateway

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tryon_gateway::{api, config::Settings, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the credential may come from the real environment
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    if settings.logging.format == "pretty" {
        registry.with(fmt::layer().pretty()).init();
    } else {
        registry.with(fmt::layer().json()).init();
    }

    info!("Starting Virtual Try-On Gateway");
    info!(
        host = %settings.server.host,
        port = settings.server.port,
        model = %settings.upstream.model,
        max_attempts = settings.upstream.max_attempts,
        "Loaded configuration"
    );

    if std::env::var(&settings.upstream.api_key_env).is_err() {
        tracing::warn!(
            variable = %settings.upstream.api_key_env,
            "Upstream credential is not set; try-on requests will fail until it is"
        );
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let app_state = Arc::new(AppState::from_settings(settings)?);

    let app = api::routes::create_router(app_state);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
