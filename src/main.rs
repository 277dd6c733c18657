use std::time::Duration;

use anyhow::Context;
use dotenvy::dotenv;
use ridepool::logging::init_tracing;
use ridepool::metrics::{init_metrics, metrics_app};
use ridepool::router::init_router;
use ridepool::state::init_app_state;
use ridepool_config::ServerConfig;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

const SESSION_PRUNE_INTERVAL: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server_config = ServerConfig::from_env();
    let state = init_app_state().await?;

    if let Some(port) = server_config.metrics_port {
        let handle = init_metrics()?;
        let address = format!("{}:{}", server_config.host, port);
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind metrics listener on {}", address))?;
        info!("Metrics available at http://{}/metrics", address);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                warn!(error = %e, "Metrics server stopped");
            }
        });
    }

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let pruned = sessions.prune_expired().await;
            if pruned > 0 {
                debug!(pruned, "Pruned expired refresh sessions");
            }
        }
    });

    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Server running on http://{}", address);
    info!("Swagger UI available at http://{}/swagger-ui", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
