//! Process configuration.
//!
//! Defaults are merged with `SQLAB_`-prefixed environment variables via figment;
//! `dotenvy` (called from `main`) makes a local `.env` file part of that
//! environment. The resolved config lives behind a process-wide `LazyLock`.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::LazyLock;
use tracing::warn;

pub const ENV_PREFIX: &str = "SQLAB_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub loglevel: String,
    /// Key material for the private cookie jar. Must be at least 32 bytes.
    pub secret_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database_url: "sqlite:data/lab.db".to_string(),
            loglevel: "info".to_string(),
            secret_key: "sqlab-dev-cookie-secret-0123456789abcdefghijklmnopqrstuvwxyz-0123456789"
                .to_string(),
        }
    }
}

impl Config {
    /// Resolve the listen address. The lab only ever binds loopback: a
    /// non-loopback (or unparseable) host is overridden to 127.0.0.1.
    pub fn bind_addr(&self) -> SocketAddr {
        let requested = match self.host.as_str() {
            "localhost" => IpAddr::V4(Ipv4Addr::LOCALHOST),
            host => host.parse().unwrap_or_else(|_| {
                warn!(host, "unparseable host, falling back to 127.0.0.1");
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            }),
        };
        let ip = if requested.is_loopback() {
            requested
        } else {
            warn!(host = %requested, "refusing non-loopback bind address, using 127.0.0.1");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        };
        SocketAddr::new(ip, self.port)
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .expect("invalid configuration")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_loopback() {
        let cfg = Config::default();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:5000".parse().unwrap());
    }

    #[test]
    fn localhost_alias_resolves() {
        let cfg = Config {
            host: "localhost".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.bind_addr().ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn non_loopback_host_is_overridden() {
        let cfg = Config {
            host: "0.0.0.0".to_string(),
            port: 8080,
            ..Config::default()
        };
        let addr = cfg.bind_addr();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn garbage_host_is_overridden() {
        let cfg = Config {
            host: "not-an-address".to_string(),
            ..Config::default()
        };
        assert!(cfg.bind_addr().ip().is_loopback());
    }
}
