//! HTTP server lifecycle: startup data, background tasks, serve, shutdown

use std::net::SocketAddr;
use std::time::Duration;

use crate::api::build_app;
use crate::config::Config;
use crate::db::seed;
use crate::error::BoxError;
use crate::state::AppState;

const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

pub async fn run(config: Config) -> Result<(), BoxError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(config).await?;

    if state.config.seed_demo_data {
        if let Err(e) = seed::seed_demo_data(&state.pool, &state.config.seed_retailer_password).await {
            tracing::warn!(error = %e, "Demo data seeding failed, continuing without it");
        }
    }
    if state.config.admin_username.is_none() {
        tracing::warn!("ADMIN_USERNAME not set, no admin account will be bootstrapped");
    }
    seed::bootstrap_admin(&state.pool, &state.config).await?;

    let limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            limiter.cleanup().await;
        }
    });

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Smart Market server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
