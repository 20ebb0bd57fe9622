//! API server entry point.

use std::sync::Arc;

use api::config::Config;
use api::routes::connectivity::AppState;
use connectivity::{ConnectionSettings, Neo4jConnector, Prober};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    // 1. Pick up a local .env file if there is one
    let _ = dotenv::dotenv();

    // 2. Load server configuration and initialize tracing
    let config = Config::from_env().unwrap_or_else(|err| {
        eprintln!("invalid server configuration: {err}");
        std::process::exit(1);
    });
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 3. Load Neo4j settings; missing variables abort startup
    let settings = ConnectionSettings::from_env().unwrap_or_else(|err| {
        tracing::error!(error = %err, "invalid Neo4j configuration");
        std::process::exit(1);
    });

    // 4. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 5. Build the application
    let prober =
        Prober::new(Neo4jConnector::new(), Arc::new(settings)).with_timeout(config.probe_timeout);
    let app = api::create_app(Arc::new(AppState::new(prober)), metrics_handle);

    // 6. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
