//! Binary entry point: configuration, logging, startup validation, serve.

use tokio::signal;
use tracing::info;

use connector_api::config::Config;
use connector_api::mapping::ActionMap;
use connector_api::state::AppState;
use connector_api::{logging, router};

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values).
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.log_filter);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "Starting WTL HLR/HSS connector"
    );

    // Typo guard: every mapping key must be a known event type.
    let actions = ActionMap::standard();
    if let Err(e) = actions.validate() {
        eprintln!("FATAL: {e}");
        std::process::exit(1);
    }
    info!(mapped_event_types = actions.len(), "Action mapping validated");

    let state = match AppState::new(config, actions) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize WTL client: {e}");
            std::process::exit(1);
        }
    };

    let addr = state.config.bind_addr();
    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(%addr, "Server listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Graceful shutdown on Ctrl+C or SIGTERM. In-flight provisioning calls run
/// on detached tasks and are not aborted by connection teardown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
