use std::error::Error;

use backend::config::{Config, StoreKind};
use backend::{app, telemetry, MemoryStore, RedisStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();
    telemetry::init()?;

    let config = Config::from_env()?;
    let router = match config.store {
        StoreKind::Redis => {
            let store = RedisStore::connect(&config.redis_url, config.key_prefix.clone()).await?;
            tracing::info!(redis_url = %config.redis_url, prefix = %config.key_prefix, "connected to redis");
            app(store, config.static_dir.clone())
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store, todos will not survive a restart");
            app(MemoryStore::new(), config.static_dir.clone())
        }
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("server started at http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
