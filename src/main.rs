//! coursehub server: reads config from the environment, opens the store, serves the API.

use coursehub::{
    app, apply_migrations, ensure_database_exists, AppState, DocumentStore, MemoryStore, PgStore, ServerConfig,
    StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coursehub=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let store = open_store(&config).await?;
    let router = app(AppState::new(store), config.body_limit);

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("shut down");
    Ok(())
}

/// Connect and migrate before serving; a store that cannot be reached stops startup.
async fn open_store(config: &ServerConfig) -> Result<Arc<dyn DocumentStore>, Box<dyn std::error::Error>> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "database connection failed");
                    e
                })?;
            apply_migrations(&pool, &config.schema).await?;
            tracing::info!(schema = %config.schema, "connected to postgres");
            Ok(Arc::new(PgStore::new(pool, config.schema.clone())))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
