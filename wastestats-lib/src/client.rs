//! Main WasteStatsClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::error::BackendError;
use crate::error::Error;

/// The main client for the waste-statistics backend API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use wastestats_lib::WasteStatsClient;
///
/// let client = WasteStatsClient::builder("http://localhost:5000").build()?;
/// let lgas = client.lgas().await?;
/// ```
#[derive(Clone, Debug)]
pub struct WasteStatsClient {
    inner: Arc<WasteStatsClientInner>,
}

#[derive(Debug)]
struct WasteStatsClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl WasteStatsClient {
    /// Creates a new builder for constructing a client.
    pub fn builder(url: impl Into<String>) -> WasteStatsClientBuilder {
        WasteStatsClientBuilder::new(url)
    }

    /// Validates connectivity to the backend.
    ///
    /// Issues a cheap request (the LGA catalogue) to verify that the backend
    /// is reachable and answering with well-formed JSON.
    pub async fn connect(&self) -> Result<(), Error> {
        let _: Vec<serde_json::Value> = self.get_json("/api/lgas", &[]).await?;
        Ok(())
    }

    /// Returns the base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Performs a GET request against `path` and decodes the JSON response.
    ///
    /// This is the low-level request method used by all API operations.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, Error> {
        let url = format!("{}{}", self.inner.base_url.trim_end_matches('/'), path);

        let mut request = self.inner.http_client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(ApiError::from)?;
            serde_json::from_str(&body).map_err(|e| {
                Error::Api(ApiError::parse_with_body(
                    format!("GET {path}: {e}"),
                    body,
                ))
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            // Error responses still carry the backend envelope where possible.
            if let Ok(detail) = serde_json::from_str::<BackendError>(&body) {
                return Err(Error::Backend(detail));
            }
            Err(Error::Api(ApiError::http(status.as_u16(), body)))
        }
    }
}

/// Builder for constructing a [`WasteStatsClient`].
///
/// # Example
///
/// ```ignore
/// let client = WasteStatsClient::builder("http://localhost:5000")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct WasteStatsClientBuilder {
    url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl WasteStatsClientBuilder {
    /// Creates a new builder for the given backend URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`WasteStatsClient`].
    ///
    /// Fails with [`ApiError::InvalidUrl`] if the backend URL does not parse.
    pub fn build(self) -> Result<WasteStatsClient, Error> {
        let url = Url::parse(&self.url).map_err(|e| {
            Error::Api(ApiError::InvalidUrl(format!("{}: {}", self.url, e)))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Api(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                self.url,
                url.scheme()
            ))));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(|e| Error::Api(ApiError::from(e)))?
            }
        };

        Ok(WasteStatsClient {
            inner: Arc::new(WasteStatsClientInner {
                base_url: self.url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_valid_url() {
        let client = WasteStatsClient::builder("http://localhost:5000").build();
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_build_rejects_garbage_url() {
        let err = WasteStatsClient::builder("not a url").build().unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_build_rejects_non_http_scheme() {
        let err = WasteStatsClient::builder("ftp://example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidUrl(_))));
    }
}
