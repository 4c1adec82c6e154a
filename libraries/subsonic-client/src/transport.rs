//! HTTP transport.
//!
//! Submits one request per call and hands back the raw response. No retries;
//! the only deadline is the one configured on the underlying client.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::request::{HttpVerb, RequestDescriptor};

/// Response as received, before any decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Thin wrapper around a configured `reqwest::Client`.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }

    /// Full URL of an operation, without parameters.
    pub(crate) fn endpoint_url(config: &ClientConfig, operation: &str) -> Result<Url> {
        let api_path = config.api_path.trim_matches('/');
        let url = if api_path.is_empty() {
            format!("{}/{}", config.url, operation)
        } else {
            format!("{}/{}/{}", config.url, api_path, operation)
        };

        Url::parse(&url).map_err(|e| Error::Config(format!("invalid URL {}: {}", url, e)))
    }

    pub(crate) async fn send(
        &self,
        config: &ClientConfig,
        request: &RequestDescriptor,
    ) -> Result<RawResponse> {
        let url = Self::endpoint_url(config, request.operation())?;
        let pairs: Vec<(&str, &str)> = request.params().iter().collect();

        debug!(
            operation = %request.operation(),
            verb = ?request.verb(),
            params = pairs.len(),
            "Sending request"
        );

        let builder = self.http.request(request.verb().into(), url);
        let builder = match request.verb() {
            HttpVerb::Get => builder.query(&pairs),
            HttpVerb::Post => builder.form(&pairs),
        };

        let response = builder.send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        debug!(
            operation = %request.operation(),
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or("-"),
            bytes = body.len(),
            "Received response"
        );

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;

    fn config(url: &str) -> ClientConfig {
        ClientConfig::new(url, Credentials::with_password("u", "p", "test"))
    }

    #[test]
    fn test_endpoint_url() {
        let url = HttpTransport::endpoint_url(&config("https://example.com"), "ping").unwrap();
        assert_eq!(url.as_str(), "https://example.com/rest/ping");
    }

    #[test]
    fn test_endpoint_url_with_custom_path() {
        let config = config("https://example.com/music").with_api_path("/api/rest/");
        let url = HttpTransport::endpoint_url(&config, "getGenres").unwrap();
        assert_eq!(url.as_str(), "https://example.com/music/api/rest/getGenres");
    }

    #[test]
    fn test_endpoint_url_without_path() {
        let config = config("https://example.com").with_api_path("");
        let url = HttpTransport::endpoint_url(&config, "ping").unwrap();
        assert_eq!(url.as_str(), "https://example.com/ping");
    }
}
