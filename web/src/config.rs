//! Server configuration.
//!
//! Loaded from environment variables with defaults that reproduce the fixed
//! ports of the mocked systems, so running a mock needs no configuration.

use std::env;
use thiserror::Error;
use tokio::net::TcpListener;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `<PREFIX>_PORT` is set but is not a port number
    #[error("Invalid value {value:?} for {key}")]
    InvalidPort {
        /// Variable name
        key: String,
        /// Rejected value
        value: String,
    },
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host name or IP address to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// `tracing_subscriber::EnvFilter` directives
    pub log_filter: String,
}

impl ServerConfig {
    /// Load configuration from `<PREFIX>_HOST`, `<PREFIX>_PORT` and `RUST_LOG`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] when the port variable does not parse.
    pub fn from_env(
        prefix: &str,
        default_port: u16,
        default_log_filter: &str,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(prefix, default_port, default_log_filter, |key| {
            env::var(key).ok()
        })
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] when the port variable does not parse.
    pub fn from_lookup<F>(
        prefix: &str,
        default_port: u16,
        default_log_filter: &str,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = format!("{prefix}_PORT");
        let port = match lookup(&key) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { key, value })?,
            None => default_port,
        };

        Ok(Self {
            host: lookup(&format!("{prefix}_HOST")).unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| default_log_filter.to_string()),
        })
    }

    /// Bind a listener, resolving `host` when it is a name.
    ///
    /// # Errors
    ///
    /// Resolution or bind failures.
    pub async fn bind(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FILTER: &str = "info,mock_sdc=debug";

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup("MOCK_SDC", 30206, FILTER, |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 30206);
        assert_eq!(config.log_filter, FILTER);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MOCK_SDC_HOST", "127.0.0.1"),
            ("MOCK_SDC_PORT", "8080"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = load(&[("MOCK_SDC_PORT", "http")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value \"http\" for MOCK_SDC_PORT");
    }

    #[tokio::test]
    async fn test_bind_resolves_host_names() {
        let config = load(&[("MOCK_SDC_HOST", "localhost"), ("MOCK_SDC_PORT", "0")]).unwrap();

        let listener = config.bind().await.unwrap();

        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }
}
