//! Server configuration sourced from the environment.

use std::env;
use std::net::SocketAddr;

/// Environment variable naming the socket address to bind.
const BIND_ADDR_VAR: &str = "BIND_ADDR";
/// Environment variable naming the PostgreSQL connection URL.
const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Address used when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Failures while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `BIND_ADDR` was set but did not parse as a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Runtime configuration for the HTTP server.
///
/// When `database_url` is absent the server runs against in-memory
/// repositories, which suits local development and smoke tests.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
    database_url: Option<String>,
}

impl ServerConfig {
    /// Construct a configuration binding the given address with no database.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            database_url: None,
        }
    }

    /// Attach a PostgreSQL connection URL for database-backed persistence.
    #[must_use]
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Read configuration from `BIND_ADDR` and `DATABASE_URL`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBindAddr`] when `BIND_ADDR` is set but
    /// unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_addr = env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let bind_addr = raw_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                value: raw_addr,
                message: e.to_string(),
            })?;
        let database_url = env::var(DATABASE_URL_VAR).ok();
        Ok(Self {
            bind_addr,
            database_url,
        })
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// The configured database URL, if any.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}
