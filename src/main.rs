use std::net::SocketAddr;

use anyhow::Context;
use mimalloc::MiMalloc;
use resource_manager::config::AppConfig;
use resource_manager::services::resource::ResourceService;
use resource_manager::{db, routes, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    // Human-readable logs while developing, JSON everywhere else.
    let development = config.is_development();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resource_manager=debug,tower_http=debug".into()),
        )
        .with(development.then(|| tracing_subscriber::fmt::layer().pretty()))
        .with((!development).then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    if let Some(dir) = config.database_dir() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create database directory {}", dir.display()))?;
    }

    let pool = db::create_pool(&config.database_url(), config.database_max_connections)
        .await
        .context("Failed to open database")?;
    db::migrate(&pool).await.context("Failed to apply migrations")?;
    tracing::info!(database = %config.database_path, "Database ready");

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;
    tracing::info!(
        host = %addr,
        environment = %config.environment,
        api_prefix = %config.api_prefix,
        "Starting resource manager API server"
    );

    let state = AppState {
        resources: ResourceService::new(pool),
        config,
    };
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
