mod backend;
mod config;
mod handlers;
mod models;
mod router;
mod topology;
mod utils;
mod workflow;

use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backend::{NetworkApi, NetworkApiClient};
use config::Config;
use topology::TopologyStore;

/// Application state shared across handlers
pub struct AppState {
    pub topology: Arc<TopologyStore>,
    pub api: Arc<dyn NetworkApi>,
    pub config: Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tenant_network=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let cfg = Config::load();
    tracing::info!("Starting Tenant Network Server");
    tracing::info!("Network store: {}", cfg.network_api_url);
    tracing::info!("Refresh strategy: {:?}", cfg.refresh_strategy);
    tracing::info!("Listen: {}", cfg.listen_addr);

    let client = NetworkApiClient::new(
        cfg.network_api_url.clone(),
        Duration::from_secs(cfg.request_timeout_secs),
    )?;
    let api: Arc<dyn NetworkApi> = Arc::new(client);
    let topology = Arc::new(TopologyStore::new(api.clone(), cfg.refresh_strategy));

    // Initial load; the view starts empty if the store is down
    if let Err(e) = topology.refresh().await {
        tracing::warn!("Initial topology load failed: {}", e);
    }

    let state = Arc::new(AppState {
        topology,
        api,
        config: cfg.clone(),
    });

    let app = router::build(state, &cfg.frontend_dir);

    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    tracing::info!("Tenant Network listening on {}", cfg.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Tenant Network shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
