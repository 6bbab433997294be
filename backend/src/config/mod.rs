//! Application configuration management

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result, bail};

use crate::db::seed::SeedMode;

/// Output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    pub fn from_arg(value: &str) -> Option<Self> {
        match value {
            "json" => Some(LogFormat::Json),
            "pretty" => Some(LogFormat::Pretty),
            _ => None,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP listener to.
    ///
    /// `HOST` must be an IP literal or `localhost`; other host names are
    /// not resolved.
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// SQLite database path or `sqlite:` URL
    pub database_url: String,

    /// Maximum pooled SQLite connections, never zero
    pub database_max_connections: u32,

    /// What to do with the sample rows at startup
    pub seed_mode: SeedMode,

    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Prefer DATABASE_PATH, fall back to DATABASE_URL
        let database_url = var("DATABASE_PATH")
            .or_else(|| var("DATABASE_URL"))
            .unwrap_or_else(|| "./database.sqlite".to_string());

        let seed_mode = match var("SEED_MODE") {
            Some(value) => match SeedMode::from_arg(&value) {
                Some(mode) => mode,
                None => bail!("Invalid SEED_MODE '{}' (expected reset, if-empty or off)", value),
            },
            None => SeedMode::default(),
        };

        let log_format = match var("LOG_FORMAT") {
            Some(value) => match LogFormat::from_arg(&value) {
                Some(format) => format,
                None => bail!("Invalid LOG_FORMAT '{}' (expected json or pretty)", value),
            },
            None => LogFormat::default(),
        };

        Ok(Self {
            host: match var("HOST") {
                Some(host) if host == "localhost" => IpAddr::V4(Ipv4Addr::LOCALHOST),
                Some(host) => host
                    .parse()
                    .with_context(|| format!("Invalid HOST '{}' (expected an IP or localhost)", host))?,
                None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            },

            port: var("PORT")
                .unwrap_or_else(|| "4000".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(5),

            seed_mode,
            log_format,
        })
    }

    /// Socket address the server listens on
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.database_url, "./database.sqlite");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.seed_mode, SeedMode::IfEmpty);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:4000");
    }

    #[test]
    fn test_database_path_wins_over_url() {
        let config = config_from(&[
            ("DATABASE_PATH", "/tmp/books.db"),
            ("DATABASE_URL", "sqlite://other.db"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "/tmp/books.db");

        let config = config_from(&[("DATABASE_URL", "sqlite://other.db")]).unwrap();
        assert_eq!(config.database_url, "sqlite://other.db");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("SEED_MODE", "reset"),
            ("LOG_FORMAT", "pretty"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.seed_mode, SeedMode::Reset);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("HOST", "localhost:1")]).is_err());
        assert!(config_from(&[("HOST", "books.internal")]).is_err());
        assert!(config_from(&[("SEED_MODE", "always")]).is_err());
        assert!(config_from(&[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_bad_pool_size_falls_back() {
        let config = config_from(&[("DATABASE_MAX_CONNECTIONS", "many")]).unwrap();
        assert_eq!(config.database_max_connections, 5);

        let config = config_from(&[("DATABASE_MAX_CONNECTIONS", "0")]).unwrap();
        assert_eq!(config.database_max_connections, 5);

        let config = config_from(&[("DATABASE_MAX_CONNECTIONS", "2")]).unwrap();
        assert_eq!(config.database_max_connections, 2);
    }

    #[test]
    fn test_localhost_binds_loopback() {
        let config = config_from(&[("HOST", "localhost"), ("PORT", "4001")]).unwrap();
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:4001");
    }
}
