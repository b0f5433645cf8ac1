use std::env;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const API_BASE_VAR: &str = "LISTEN_API_BASE";
pub const TIMEOUT_VAR: &str = "LISTEN_HTTP_TIMEOUT_SECS";

/// Compile-time override, mirroring a build-time API base.
const BUILD_API_BASE: Option<&str> = option_env!("LISTEN_API_BASE");

/// Where the lesson API lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Duration,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` when `base_url` does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let raw = base_url.trim();
        let parsed = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            raw: raw.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        Ok(Self {
            base_url: parsed,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Read `LISTEN_API_BASE` and `LISTEN_HTTP_TIMEOUT_SECS`.
    ///
    /// Falls back to the base URL baked in at build time, then to
    /// `DEFAULT_API_BASE`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unusable URL or timeout value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = env::var(API_BASE_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| BUILD_API_BASE.unwrap_or(DEFAULT_API_BASE).to_string());
        let mut config = Self::new(&base)?;

        if let Ok(raw) = env::var(TIMEOUT_VAR) {
            config = config.with_timeout(parse_timeout_secs(&raw)?);
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build an HTTP client honouring the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Client` if the TLS backend cannot be initialised.
    pub fn http_client(&self) -> Result<Client, ConfigError> {
        Ok(Client::builder().timeout(self.timeout).build()?)
    }

    /// Base URL with `segments` appended, each percent-encoded as one segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Parse a whole number of seconds, rejecting zero.
///
/// # Errors
///
/// Returns `ConfigError::InvalidTimeout` for non-numeric or zero input.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            raw: raw.to_string(),
        }),
    }
}
