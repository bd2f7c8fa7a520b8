//! Transport trait and the reqwest-backed HttpTransport

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::config::FormConfig;
use crate::error::TransportError;

/// Sends a JSON payload to an endpoint and returns the raw response body.
///
/// Implementations only move bytes; decoding the body into a
/// [`SubmissionOutcome`](super::SubmissionOutcome) is the pipeline's job.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `payload` as JSON to `endpoint` and returns the response body.
    async fn post_json(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
    ) -> Result<String, TransportError>;
}

/// A [`Transport`] over HTTP.
///
/// Endpoints are resolved against the base URL, so `/submitForm` with a base
/// of `https://example.com/app/` posts to `https://example.com/submitForm`.
/// Absolute endpoints are used as-is.
///
/// This transport is cheap to clone (uses `Arc` internally).
///
/// # Example
///
/// ```ignore
/// use formcheck_lib::submit::HttpTransport;
///
/// let transport = HttpTransport::builder()
///     .base_url("https://example.com")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
#[derive(Clone)]
pub struct HttpTransport {
    inner: Arc<HttpTransportInner>,
}

struct HttpTransportInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a new builder for constructing a transport.
    pub fn builder() -> HttpTransportBuilder<Missing> {
        HttpTransportBuilder::new()
    }

    /// Creates a transport for `base_url` with the timeouts from `config`.
    pub fn from_config(base_url: &str, config: &FormConfig) -> Result<Self, TransportError> {
        let mut builder = Self::builder().base_url(base_url);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        builder.build()
    }

    /// Returns the base URL endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolves `endpoint` against the base URL.
    pub fn resolve(&self, endpoint: &str) -> Result<Url, TransportError> {
        self.inner
            .base_url
            .join(endpoint)
            .map_err(|e| TransportError::InvalidUrl(format!("{endpoint}: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
    ) -> Result<String, TransportError> {
        let url = self.resolve(endpoint)?;
        debug!("POST {}", url);

        let mut request = self.inner.http_client.post(url).json(payload);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        // A failing status with a JSON body still carries an outcome.
        if !status.is_success() && serde_json::from_str::<serde_json::Value>(&body).is_err() {
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(TransportError::http(status.as_u16(), message));
        }

        Ok(body)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`HttpTransport`].
///
/// Uses the typestate pattern so `build` is only available once the base URL
/// has been set.
pub struct HttpTransportBuilder<BaseUrl> {
    base_url: BaseUrl,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl HttpTransportBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the base URL endpoints are resolved against.
    pub fn base_url(self, url: impl Into<String>) -> HttpTransportBuilder<Set<String>> {
        HttpTransportBuilder {
            base_url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for HttpTransportBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> HttpTransportBuilder<U> {
    /// Sets the whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client and ignored when a
    /// custom client is supplied.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl HttpTransportBuilder<Set<String>> {
    /// Builds the [`HttpTransport`].
    pub fn build(self) -> Result<HttpTransport, TransportError> {
        let raw = self.base_url.0;
        let base_url =
            Url::parse(&raw).map_err(|e| TransportError::InvalidUrl(format!("{raw}: {e}")))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(HttpTransport {
            inner: Arc::new(HttpTransportInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
