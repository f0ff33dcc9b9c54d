//! Server configuration read from environment variables.
//!
//! - `TODO_DB_PATH`: SQLite database file path (default: "todos.db")
//! - `TODO_HOST`: listen address (default: "127.0.0.1")
//! - `TODO_PORT`: listen port (default: "8000")
//! - `TODO_CORS_ORIGIN`: the single origin allowed by CORS
//!   (default: "http://localhost:3003")

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;

pub const DEFAULT_DB_PATH: &str = "todos.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "8000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3003";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid TODO_HOST {value:?}: {source}")]
    InvalidHost {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid TODO_PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("invalid TODO_CORS_ORIGIN {value:?}: {source}")]
    InvalidCorsOrigin {
        value: String,
        source: axum::http::header::InvalidHeaderValue,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// The only origin granted cross-origin access.
    pub cors_origin: HeaderValue,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
        }
    }
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let db_path = PathBuf::from(var("TODO_DB_PATH", DEFAULT_DB_PATH));

        let host = var("TODO_HOST", DEFAULT_HOST);
        let ip: IpAddr = host
            .parse()
            .map_err(|source| ConfigError::InvalidHost {
                value: host.clone(),
                source,
            })?;

        let port = var("TODO_PORT", DEFAULT_PORT);
        let port: u16 = port
            .parse()
            .map_err(|source| ConfigError::InvalidPort {
                value: port.clone(),
                source,
            })?;

        let origin = var("TODO_CORS_ORIGIN", DEFAULT_CORS_ORIGIN);
        let cors_origin =
            HeaderValue::from_str(&origin).map_err(|source| ConfigError::InvalidCorsOrigin {
                value: origin.clone(),
                source,
            })?;

        Ok(ServerConfig {
            db_path,
            bind_addr: SocketAddr::new(ip, port),
            cors_origin,
        })
    }
}
