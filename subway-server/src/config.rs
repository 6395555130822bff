//! Server configuration.

use std::net::SocketAddr;

/// Environment variable holding the listen address.
pub const BIND_ADDR_VAR: &str = "SUBWAY_BIND_ADDR";

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "subway_server=info,tower_http=debug";

/// Errors that can occur while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Listen address could not be parsed
    #[error("invalid {var} {value:?}: {source}")]
    InvalidBindAddr {
        var: &'static str,
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Create a new configuration listening on `bind_addr`.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Read configuration from the environment, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = value
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddr {
                    var: BIND_ADDR_VAR,
                    value: value.clone(),
                    source,
                })?;
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}
