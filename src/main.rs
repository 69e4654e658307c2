use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use stackboard_core::app_state::build_app_state;
use stackboard_core::config::AppConfig;
use stackboard_core::core::cache::ttl_cache::spawn_cache_janitor;
use stackboard_core::logging::init_tracing;
use stackboard_core::routes::app_router;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    let _guard = init_tracing(&config)?;
    config.log_fallbacks();

    let state = build_app_state(&config).await?;
    let janitor = spawn_cache_janitor(state.cache.clone(), config.cache_purge_every);

    let app = app_router().with_state(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    janitor.abort();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
