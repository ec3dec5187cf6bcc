//! Delphi Estimator server entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use delphi_estimator::adapters::http::{app_router, SessionAppState};
use delphi_estimator::adapters::{OsRandomSource, SqliteSessionStore};
use delphi_estimator::application::SessionRepository;
use delphi_estimator::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let store = SqliteSessionStore::connect(&config.database.url, config.database.max_connections)
        .await?;
    let repository = SessionRepository::new(Arc::new(store), Arc::new(OsRandomSource)).await?;

    let app = app_router(SessionAppState::new(Arc::new(repository)), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, database = %config.database.url, "Delphi estimator listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level; production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
