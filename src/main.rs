// src/main.rs

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use geoquiz::catalog::QuizCatalog;
use geoquiz::config::Config;
use geoquiz::location::geocoder::NominatimResolver;
use geoquiz::routes;
use geoquiz::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "geoquiz.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let catalog = match &config.catalog_path {
        Some(path) => QuizCatalog::from_path(path)
            .with_context(|| format!("failed to load catalog from {}", path))?,
        None => QuizCatalog::default(),
    };
    tracing::info!("Catalog loaded: {:?}", catalog.countries());

    let resolver = NominatimResolver::new(config.geocoder.clone())
        .context("failed to build geocoder client")?;
    tracing::info!("Geocoding via {}", config.geocoder.base_url);

    let addr = config.bind_addr;
    let state = AppState::new(config, catalog, Arc::new(resolver));

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
