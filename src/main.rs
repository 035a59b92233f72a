mod actor_framework;
mod app_system;
mod auth;
mod clients;
mod domain;
mod http;
mod product_actor;
mod settings;

#[cfg(test)]
mod mock_framework;

use anyhow::Context;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

use crate::app_system::{setup_tracing, InventorySystem};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let settings = Settings::new().context("load settings")?;
    if settings.auth.uses_default_secret() {
        warn!("Using the built-in token secret; set INVENTORY__AUTH__SECRET for real deployments");
    }

    let system = InventorySystem::new(&settings);
    let app = http::router(system.state(), &settings.frontend);

    let listener = TcpListener::bind(&settings.server.bind)
        .await
        .with_context(|| format!("bind {}", settings.server.bind))?;
    info!(address = %settings.server.bind, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;

    system.shutdown().await.context("stop actors")?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
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
