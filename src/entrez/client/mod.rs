mod bulk;
mod efetch;
mod einfo;
mod esearch;

pub use bulk::BULK_PAGE_SIZE;

use reqwest::{Client, Response};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{EntrezError, Result};
use crate::rate_limit::RateLimiter;
use crate::retry::with_retry;

/// Client for the NCBI Entrez E-utilities
///
/// Each logical operation issues exactly one HTTP GET inside a bounded
/// retry loop; responses are handed back unparsed except for the JSON
/// envelopes the client itself needs (validation catalogs and search
/// orchestration scalars).
#[derive(Clone)]
pub struct EntrezClient {
    client: Client,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl EntrezClient {
    /// Create a client with NCBI defaults and no API key
    ///
    /// # Example
    ///
    /// ```
    /// use entrez_client::EntrezClient;
    ///
    /// let client = EntrezClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use entrez_client::{ClientConfig, EntrezClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_api_key("your_api_key_here")
    ///     .with_email("researcher@university.edu");
    ///
    /// let client = EntrezClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let rate_limiter = config.create_rate_limiter();

        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            rate_limiter,
            config,
        }
    }

    /// Create a client configured from the environment
    ///
    /// Endpoint URLs are resolved per [`crate::config::ServiceEndpoints::from_env`];
    /// a missing endpoint group fails here, before any request is made.
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_config(ClientConfig::from_env()?))
    }

    /// Create a client with a custom reqwest client and default configuration
    pub fn with_client(client: Client) -> Self {
        let config = ClientConfig::new();
        let rate_limiter = config.create_rate_limiter();

        Self {
            client,
            rate_limiter,
            config,
        }
    }

    /// Get a reference to the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    pub(crate) fn einfo_url(&self, query: &str) -> String {
        format!("{}?{}", self.config.endpoints.einfo, query)
    }

    pub(crate) fn esearch_url(&self, query: &str) -> String {
        format!("{}?{}", self.config.endpoints.esearch, query)
    }

    pub(crate) fn efetch_url(&self, query: &str) -> String {
        format!("{}?{}", self.config.endpoints.efetch, query)
    }

    /// Internal helper for making HTTP requests with retry logic.
    /// Automatically appends identification parameters (api_key, email, tool).
    pub(crate) async fn make_request(&self, url: &str) -> Result<Response> {
        let mut final_url = url.to_string();
        let api_params = self.config.build_api_params();

        if !api_params.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            final_url.push(separator);

            let param_strings: Vec<String> = api_params
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
                .collect();
            final_url.push_str(&param_strings.join("&"));
        }

        let response = with_retry(
            || async {
                self.rate_limiter.acquire().await;
                debug!("Making API request to: {}", final_url);
                let response = self
                    .client
                    .get(&final_url)
                    .send()
                    .await
                    .map_err(EntrezError::from)?;

                // Convert server errors and throttling into retryable errors
                if response.status().is_server_error() || response.status().as_u16() == 429 {
                    return Err(EntrezError::ApiError {
                        status: response.status().as_u16(),
                        message: response
                            .status()
                            .canonical_reason()
                            .unwrap_or("Unknown error")
                            .to_string(),
                    });
                }

                Ok(response)
            },
            &self.config.retry_config,
            "NCBI API request",
        )
        .await?;

        // Remaining non-success statuses (4xx) are surfaced without retry
        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(EntrezError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        Ok(response)
    }
}

impl Default for EntrezClient {
    fn default() -> Self {
        Self::new()
    }
}
