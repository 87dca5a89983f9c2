//! Typed client configuration
//!
//! All environment lookups happen here, once, at client construction.
//! Call sites never consult the environment; a missing variable surfaces as
//! [`EntrezError::MissingConfiguration`] before any request is made.

use std::env;
use std::time::Duration;

use crate::error::{EntrezError, Result};
use crate::rate_limit::RateLimiter;
use crate::retry::RetryConfig;

/// Shared provider root for the NCBI E-utilities
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

const ENV_BASE_URL: &str = "NCBI_API_BASE_URL";
const ENV_EINFO_URL: &str = "NCBI_EINFO_URL";
const ENV_ESEARCH_URL: &str = "NCBI_ESEARCH_URL";
const ENV_EFETCH_URL: &str = "NCBI_EFETCH_URL";
const ENV_API_KEY: &str = "NCBI_API_KEY";
const ENV_EMAIL: &str = "NCBI_EMAIL";
const ENV_TOOL: &str = "NCBI_TOOL";

/// Resolved URLs for the three E-utilities endpoint families
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    pub einfo: String,
    pub esearch: String,
    pub efetch: String,
}

impl ServiceEndpoints {
    /// Derive all endpoints from one provider root
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            einfo: format!("{base}/einfo.fcgi"),
            esearch: format!("{base}/esearch.fcgi"),
            efetch: format!("{base}/efetch.fcgi"),
        }
    }

    /// Resolve endpoints from the environment
    ///
    /// Per-endpoint overrides (`NCBI_EINFO_URL`, `NCBI_ESEARCH_URL`,
    /// `NCBI_EFETCH_URL`) win; anything not overridden is derived from
    /// `NCBI_API_BASE_URL`. An endpoint with neither source is fatal.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|var| env::var(var).ok())
    }

    fn resolve<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup(ENV_BASE_URL);

        let endpoint = |var: &str, suffix: &str| -> Result<String> {
            if let Some(url) = lookup(var) {
                return Ok(url);
            }
            match &base {
                Some(base) => Ok(format!("{}/{}", base.trim_end_matches('/'), suffix)),
                None => Err(EntrezError::MissingConfiguration {
                    variable: format!("{var} (or {ENV_BASE_URL})"),
                }),
            }
        };

        Ok(Self {
            einfo: endpoint(ENV_EINFO_URL, "einfo.fcgi")?,
            esearch: endpoint(ENV_ESEARCH_URL, "esearch.fcgi")?,
            efetch: endpoint(ENV_EFETCH_URL, "efetch.fcgi")?,
        })
    }
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self::from_base(DEFAULT_BASE_URL)
    }
}

/// Configuration for the Entrez client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint URLs for einfo/esearch/efetch
    pub endpoints: ServiceEndpoints,
    /// NCBI API key (raises the rate limit from 3 to 10 req/s)
    pub api_key: Option<String>,
    /// Contact email, recommended by NCBI for all automated clients
    pub email: Option<String>,
    /// Tool name reported to NCBI
    pub tool: Option<String>,
    /// Explicit rate limit override in requests per second
    pub rate_limit: Option<f64>,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Retry policy for transient failures
    pub retry_config: RetryConfig,
}

impl ClientConfig {
    /// Create a configuration with NCBI defaults and no API key
    pub fn new() -> Self {
        Self {
            endpoints: ServiceEndpoints::default(),
            api_key: None,
            email: None,
            tool: None,
            rate_limit: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }

    /// Load configuration from the environment
    ///
    /// Endpoint URLs are required (see [`ServiceEndpoints::from_env`]);
    /// `NCBI_API_KEY`, `NCBI_EMAIL`, and `NCBI_TOOL` are picked up when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();
        config.endpoints = ServiceEndpoints::from_env()?;
        config.api_key = env::var(ENV_API_KEY).ok();
        config.email = env::var(ENV_EMAIL).ok();
        config.tool = env::var(ENV_TOOL).ok();
        Ok(config)
    }

    /// Derive all endpoint URLs from a custom provider root
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.endpoints = ServiceEndpoints::from_base(base_url.as_ref());
        self
    }

    pub fn with_endpoints(mut self, endpoints: ServiceEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    pub fn with_rate_limit(mut self, requests_per_second: f64) -> Self {
        self.rate_limit = Some(requests_per_second);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// Effective rate limit: explicit override, else the NCBI ceiling for
    /// the key situation (10 req/s with key, 3 req/s without)
    pub fn effective_rate_limit(&self) -> f64 {
        match self.rate_limit {
            Some(rate) => rate,
            None if self.api_key.is_some() => 10.0,
            None => 3.0,
        }
    }

    /// Tool name reported to NCBI (defaults to the crate name)
    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(env!("CARGO_PKG_NAME"))
    }

    pub fn effective_user_agent(&self) -> String {
        format!(
            "{}/{} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            self.effective_tool()
        )
    }

    /// Identification parameters appended to every request URL
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(api_key) = &self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }
        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
        if let Some(tool) = &self.tool {
            params.push(("tool".to_string(), tool.clone()));
        }
        params
    }

    pub fn create_rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.effective_rate_limit())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
