//! Gateway configuration with validation.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Complete gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 6000)
    pub port: u16,
    /// Application server connection
    pub upstream: UpstreamConfig,
}

/// Application server endpoint and per-call timeouts.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL, without trailing slash (default: http://localhost:8000)
    pub base_url: String,
    /// Timeout for `/process` and `/numbers` (default: 10s)
    pub process_timeout: Duration,
    /// Timeout for `/health` (default: 5s)
    pub health_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            process_timeout: Duration::from_secs(10),
            health_timeout: Duration::from_secs(5),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 6000,
            upstream: UpstreamConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `APP_SERVER_URL` (default: http://localhost:8000)
    /// - `WEB_SERVER_HOST` (default: 0.0.0.0)
    /// - `WEB_SERVER_PORT` (default: 6000)
    /// - `PROCESS_TIMEOUT_SECS` (default: 10)
    /// - `HEALTH_TIMEOUT_SECS` (default: 5)
    pub fn from_env() -> Result<Self, GatewayConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = match lookup("APP_SERVER_URL") {
            Some(url) => url.trim().trim_end_matches('/').to_string(),
            None => defaults.upstream.base_url,
        };

        let config = Self {
            host: parse_var(&lookup, "WEB_SERVER_HOST")?.unwrap_or(defaults.host),
            port: parse_var(&lookup, "WEB_SERVER_PORT")?.unwrap_or(defaults.port),
            upstream: UpstreamConfig {
                base_url,
                process_timeout: parse_secs(&lookup, "PROCESS_TIMEOUT_SECS")?
                    .unwrap_or(defaults.upstream.process_timeout),
                health_timeout: parse_secs(&lookup, "HEALTH_TIMEOUT_SECS")?
                    .unwrap_or(defaults.upstream.health_timeout),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), GatewayConfigError> {
        if self.port == 0 {
            return Err(GatewayConfigError::InvalidValue {
                var: "WEB_SERVER_PORT",
                value: "0".into(),
            });
        }

        if self.upstream.base_url.is_empty() {
            return Err(GatewayConfigError::InvalidUpstreamUrl(String::new()));
        }
        if !(self.upstream.base_url.starts_with("http://")
            || self.upstream.base_url.starts_with("https://"))
        {
            return Err(GatewayConfigError::InvalidUpstreamUrl(
                self.upstream.base_url.clone(),
            ));
        }

        if self.upstream.process_timeout.is_zero() {
            return Err(GatewayConfigError::InvalidValue {
                var: "PROCESS_TIMEOUT_SECS",
                value: "0".into(),
            });
        }
        if self.upstream.health_timeout.is_zero() {
            return Err(GatewayConfigError::InvalidValue {
                var: "HEALTH_TIMEOUT_SECS",
                value: "0".into(),
            });
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, GatewayConfigError>
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
            .map_err(|_| GatewayConfigError::InvalidValue { var, value }),
    }
}

fn parse_secs<F>(lookup: &F, var: &'static str) -> Result<Option<Duration>, GatewayConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_var::<u64, _>(lookup, var)?.map(Duration::from_secs))
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayConfigError {
    #[error("invalid APP_SERVER_URL '{0}': expected http(s)://HOST[:PORT]")]
    InvalidUpstreamUrl(String),

    #[error("invalid value '{value}' for {var}")]
    InvalidValue { var: &'static str, value: String },
}
