mod cli;
mod telemetry;

use crate::cli::{Cli, StorageBackendArg};
use clap::Parser;
use std::sync::Arc;
use tinylink_deriver::Sha256Deriver;
use tinylink_gateway::{App, AppState};
use tinylink_shortener::{Shortener, ShortenerService};
use tinylink_storage::{
    InMemoryMappingStore, MappingStore, RedisMappingStore, RedisStoreConfig, RetryPolicy,
    RetryingStore,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse();
    telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        store_retries = config.store_retries,
        "starting tinylink"
    );

    let shortener = match config.storage {
        StorageBackendArg::InMemory => {
            warn!("in-memory storage selected, mappings are lost on restart");
            build_shortener(InMemoryMappingStore::new(), config.store_retries)
        }
        StorageBackendArg::Redis => {
            let redis = RedisStoreConfig::builder()
                .address(config.redis_url.clone())
                .password(config.redis_password.clone())
                .namespace(config.redis_namespace.clone())
                .build();
            let store = RedisMappingStore::connect(&redis).await?;
            build_shortener(store, config.store_retries)
        }
    };

    let state = AppState::new(shortener, config.base_url);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening for http requests");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn build_shortener<S: MappingStore>(store: S, retries: u32) -> Arc<dyn Shortener> {
    let store = RetryingStore::new(store, RetryPolicy::with_retries(retries));
    Arc::new(ShortenerService::new(store, Sha256Deriver::new()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}
