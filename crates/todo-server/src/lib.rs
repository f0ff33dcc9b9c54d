//! HTTP/JSON API server for a todo list.
//!
//! Exposes list, create, update, delete, and toggle over `/todos`, backed by
//! a [`todo_storage::TodoStore`]. This crate contains the server framework,
//! configuration, API schema types, error handling, and route definitions.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::router::build_router;
use crate::state::AppState;

/// Errors that stop the server from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("failed to open database: {0}")]
    Storage(#[from] todo_storage::StorageError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Opens the database, binds the listener, and serves until Ctrl+C or
/// SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let state = AppState::open(&config.db_path)?;
    tracing::info!(db_path = %config.db_path.display(), "database ready");

    tracing::info!(origin = ?config.cors_origin, "CORS origin configured");
    let app = build_router(state, config.cors_origin);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("todo server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
///
/// A signal handler that fails to install never resolves, so the server
/// keeps running on the remaining one.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl+C, starting shutdown"),
            Err(err) => {
                tracing::warn!(%err, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("received SIGTERM, starting shutdown");
            }
            Err(err) => {
                tracing::warn!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
