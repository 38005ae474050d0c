//! Zelda Codex gateway binary

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zelda_codex::backend::{HttpWeaponBackend, InMemoryWeaponBackend, WeaponBackend};
use zelda_codex::cache::MemoryCache;
use zelda_codex::{create_router, spawn_cleanup_task, AppState, Config};

/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the in-memory cache and pick the weapon backend
/// 4. Start background TTL cleanup task
/// 5. Create Axum router with all endpoints
/// 6. Serve until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zelda_codex=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Zelda Codex gateway");

    let config = Config::from_env();
    info!(
        port = config.server_port,
        cache_ttl = config.cache_ttl,
        cache_max_entries = config.cache_max_entries,
        cleanup_interval = config.cleanup_interval,
        "configuration loaded"
    );

    let cache = MemoryCache::new(config.cache_max_entries);
    let backend = build_backend(&config)?;
    info!(backend = backend.name(), "weapon backend ready");

    let state = AppState::new(backend, Arc::new(cache.clone()), config.cache_ttl());
    let cleanup_handle = spawn_cleanup_task(cache, config.cleanup_interval);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Remote service when `WEAPONS_BACKEND_URL` is set, embedded otherwise.
fn build_backend(config: &Config) -> anyhow::Result<Arc<dyn WeaponBackend>> {
    match &config.weapons_backend_url {
        Some(url) => {
            info!(url = %url, "using remote weapon service");
            let backend = HttpWeaponBackend::new(
                url.clone(),
                config.backend_connect_timeout(),
                config.backend_timeout(),
            )
            .context("failed to build weapon service client")?;
            Ok(Arc::new(backend))
        }
        None => {
            warn!("WEAPONS_BACKEND_URL not set, using embedded in-memory weapon service");
            Ok(Arc::new(InMemoryWeaponBackend::new()))
        }
    }
}

/// Waits for Ctrl+C or SIGTERM, then stops the cleanup task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    info!("Cleanup task stopped");
}
