//! Binary entrypoint for the todo HTTP server.
//!
//! Configuration comes from environment variables; see
//! [`todo_server::config`]. Log verbosity follows `RUST_LOG` (default: info).

use todo_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let result = match ServerConfig::from_env() {
        Ok(config) => todo_server::serve(config).await,
        Err(err) => Err(err.into()),
    };

    if let Err(err) = result {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}
