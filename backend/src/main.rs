//! Bookshelf backend entry point.

use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};

use bookshelf::app::{AppState, build_app};
use bookshelf::config::Config;
use bookshelf::db::Database;
use bookshelf::graphql;
use bookshelf::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    init_tracing(config.log_format);
    info!("Starting Bookshelf backend");
    info!(?config, "Configuration loaded");

    let db = Database::connect_lazy(&config.database_url, config.database_max_connections)?;

    // Keep serving on failure; storage-backed requests will report the error
    if let Err(e) = db.initialize(config.seed_mode).await {
        error!(error = %format!("{:#}", e), "Database initialization error");
    }

    let schema = graphql::build_schema(db.clone());
    info!("GraphQL schema built");

    let app = build_app(AppState { schema });

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);
    info!("GraphQL server running at http://localhost:{}/graphql", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown");
}
