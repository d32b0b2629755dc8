//! Application server configuration with validation.
//!
//! Loaded from environment variables; every value except `DATABASE_URL` has
//! a default.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Complete application server configuration.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// HTTP listener.
    pub http: HttpConfig,
    /// Where the sequence is persisted.
    pub store: StoreLocation,
    /// Startup connection retry loop.
    pub retry: RetryPolicy,
}

impl ValidatorConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: store connection string (required)
    /// - `APP_SERVER_HOST`: bind address (default: 0.0.0.0)
    /// - `APP_SERVER_PORT`: bind port (default: 8000)
    /// - `DB_CONNECT_ATTEMPTS`: startup connection attempts (default: 5)
    /// - `DB_CONNECT_DELAY_SECS`: delay between attempts (default: 2)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_defaults = HttpConfig::default();
        let retry_defaults = RetryPolicy::default();

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let config = Self {
            http: HttpConfig {
                host: parse_var(&lookup, "APP_SERVER_HOST")?.unwrap_or(http_defaults.host),
                port: parse_var(&lookup, "APP_SERVER_PORT")?.unwrap_or(http_defaults.port),
            },
            store: database_url.parse()?,
            retry: RetryPolicy {
                max_attempts: parse_var(&lookup, "DB_CONNECT_ATTEMPTS")?
                    .unwrap_or(retry_defaults.max_attempts),
                delay: parse_var::<u64, _>(&lookup, "DB_CONNECT_DELAY_SECS")?
                    .map(Duration::from_secs)
                    .unwrap_or(retry_defaults.delay),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "APP_SERVER_PORT",
                value: "0".into(),
            });
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                var: "DB_CONNECT_ATTEMPTS",
                value: "0".into(),
            });
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8000)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8000,
        }
    }
}

/// Bounded, fixed-delay retry loop used to acquire the store at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(2),
        }
    }
}

/// Store connection string, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// `memory://` - lost on restart.
    Memory,
    /// `file://PATH` - append-only record file.
    File(PathBuf),
    /// `rocksdb://PATH` - RocksDB directory.
    RocksDb(PathBuf),
}

impl FromStr for StoreLocation {
    type Err = ConfigError;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        let url = url.trim();
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| ConfigError::InvalidDatabaseUrl(url.to_string()))?;

        match scheme.to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreLocation::Memory),
            "file" => non_empty_path(url, rest).map(StoreLocation::File),
            "rocksdb" => non_empty_path(url, rest).map(StoreLocation::RocksDb),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}

impl std::fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreLocation::Memory => write!(f, "memory://"),
            StoreLocation::File(path) => write!(f, "file://{}", path.display()),
            StoreLocation::RocksDb(path) => write!(f, "rocksdb://{}", path.display()),
        }
    }
}

fn non_empty_path(url: &str, rest: &str) -> Result<PathBuf, ConfigError> {
    if rest.is_empty() {
        Err(ConfigError::InvalidDatabaseUrl(url.to_string()))
    } else {
        Ok(PathBuf::from(rest))
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("invalid DATABASE_URL '{0}': expected SCHEME://PATH")]
    InvalidDatabaseUrl(String),

    #[error("unsupported store scheme '{0}' (expected memory, file or rocksdb)")]
    UnsupportedScheme(String),

    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}
