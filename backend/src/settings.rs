//! Server configuration loaded via OrthoConfig.
//!
//! Values come from (lowest to highest precedence) defaults, configuration
//! files, `USER_SERVICE_*` environment variables and command-line flags.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;

/// Settings controlling the listener and the storage backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_SERVICE")]
pub struct ServerSettings {
    /// Address to bind the HTTP listener to.
    pub host: Option<IpAddr>,
    /// Port to bind the HTTP listener to.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Users are kept in memory when unset.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Minimum number of idle pooled connections.
    pub pool_min_idle: Option<u32>,
    /// Apply embedded migrations before serving. Defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    /// Socket address for the listener, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool ceiling, falling back to ten connections.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Idle connections kept warm, falling back to two.
    pub fn pool_min_idle(&self) -> u32 {
        self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)
    }

    /// Whether migrations run at startup. Unset means yes.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}
