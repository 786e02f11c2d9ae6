//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable naming the stations file.
pub const STATIONS_FILE_VAR: &str = "ROUTE_STATIONS_FILE";

/// Environment variable naming the trips file.
pub const TRIPS_FILE_VAR: &str = "ROUTE_TRIPS_FILE";

/// Environment variable overriding the listen address.
pub const BIND_ADDR_VAR: &str = "ROUTE_BIND_ADDR";

/// Error from reading server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Where to load the timetable from and where to listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub stations_file: PathBuf,
    pub trips_file: PathBuf,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Default listen address.
    pub const DEFAULT_BIND_ADDR: SocketAddr =
        SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), 3000);

    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let stations_file = PathBuf::from(required(STATIONS_FILE_VAR)?);
        let trips_file = PathBuf::from(required(TRIPS_FILE_VAR)?);

        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(raw) => raw.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: BIND_ADDR_VAR,
                    reason: e.to_string(),
                }
            })?,
            None => Self::DEFAULT_BIND_ADDR,
        };

        Ok(Self {
            stations_file,
            trips_file,
            bind_addr,
        })
    }
}
