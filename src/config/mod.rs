//! Configuration handling for a single scan.
//!
//! Values are read once from the environment with sensible defaults, then
//! optionally overridden by command-line flags. The resulting `Config` is
//! immutable and handed to the page loader and the extraction pipeline at
//! construction time.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Environment variable names. Public so tests and wrappers can refer to them.
pub const ENV_USER_AGENT: &str = "SEOSCAN_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "SEOSCAN_TIMEOUT_SECS";
pub const ENV_MAX_REDIRECTS: &str = "SEOSCAN_MAX_REDIRECTS";
pub const ENV_ACCEPT_INVALID_CERTS: &str = "SEOSCAN_ACCEPT_INVALID_CERTS";
pub const ENV_MAX_BODY_BYTES: &str = "SEOSCAN_MAX_BODY_BYTES";

/// Default values used when environment variables are absent.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_REDIRECTS: usize = 5;
const DEFAULT_ACCEPT_INVALID_CERTS: bool = true;
const DEFAULT_MAX_BODY_BYTES: u64 = 10 * 1024 * 1024; // 10MB

/// Synthetic per-resource byte costs used by the page-weight estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCosts {
    pub stylesheet: u64,
    pub script: u64,
    pub image: u64,
}

impl Default for ResourceCosts {
    fn default() -> Self {
        Self {
            stylesheet: 15_000,
            script: 50_000,
            image: 100_000,
        }
    }
}

/// Scan configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    user_agent: String,
    timeout: Duration,
    max_redirects: usize,
    accept_invalid_certs: bool,
    max_body_bytes: u64,
    resource_costs: ResourceCosts,
}

impl Config {
    /// Load from environment variables, falling back to defaults.
    ///
    /// Fails only when a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let user_agent =
            env::var(ENV_USER_AGENT).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let timeout_secs = parse_env(ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?;
        let max_redirects = parse_env(ENV_MAX_REDIRECTS, DEFAULT_MAX_REDIRECTS)?;
        let accept_invalid_certs =
            parse_env(ENV_ACCEPT_INVALID_CERTS, DEFAULT_ACCEPT_INVALID_CERTS)?;
        let max_body_bytes = parse_env(ENV_MAX_BODY_BYTES, DEFAULT_MAX_BODY_BYTES)?;

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_TIMEOUT_SECS,
                reason: "timeout must be at least one second".to_string(),
            });
        }

        Ok(Self {
            user_agent,
            timeout: Duration::from_secs(timeout_secs),
            max_redirects,
            accept_invalid_certs,
            max_body_bytes,
            resource_costs: ResourceCosts::default(),
        })
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: u64) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// User-Agent header sent with the page request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    /// Total request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
    /// Maximum number of redirect hops followed.
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }
    /// Whether TLS certificate errors are ignored.
    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
    /// Largest response body accepted, in bytes.
    pub fn max_body_bytes(&self) -> u64 {
        self.max_body_bytes
    }
    pub fn resource_costs(&self) -> ResourceCosts {
        self.resource_costs
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            accept_invalid_certs: DEFAULT_ACCEPT_INVALID_CERTS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            resource_costs: ResourceCosts::default(),
        }
    }
}

fn parse_env<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                field: key,
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
