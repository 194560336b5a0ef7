// Copyright 2025 Cowboy AI, LLC.

use anyhow::Context;
use cattery::config::{load_seed_breeds, ServerConfig, StoreKind};
use cattery::http::{build_router, AppState};
use cattery::{check_breed_catalog, seed_breeds_if_empty, CatService, CatStore, InMemoryCatStore, SqliteCatStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn CatStore>> {
    let store: Arc<dyn CatStore> = match config.store {
        StoreKind::Memory => Arc::new(InMemoryCatStore::new()),
        StoreKind::Sqlite if config.database.as_os_str() == ":memory:" => {
            Arc::new(SqliteCatStore::open_in_memory().context("open in-memory sqlite store")?)
        }
        StoreKind::Sqlite => Arc::new(
            SqliteCatStore::open(&config.database)
                .with_context(|| format!("open sqlite store at {}", config.database.display()))?,
        ),
    };
    Ok(store)
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("read configuration")?;
    init_tracing(config.log_json);

    let store = open_store(&config)?;
    if let Some(path) = &config.seed_breeds {
        let breeds = load_seed_breeds(path)?;
        seed_breeds_if_empty(store.as_ref(), &breeds)
            .await
            .context("seed breed catalog")?;
    }
    check_breed_catalog(store.as_ref())
        .await
        .context("read breed catalog")?;

    let service = CatService::new(store, config.policy());
    let app = build_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("bind {}", config.bind))?;
    info!(
        addr = %config.bind,
        store = ?config.store,
        retired_breeds = config.retired_breeds.len(),
        "cattery listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("serve http")?;
    info!("cattery stopped");
    Ok(())
}
