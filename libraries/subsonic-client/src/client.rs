//! Main Subsonic client.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::envelope::{self, RawMedia};
use crate::error::{Error, Result};
use crate::params::CallParameters;
use crate::request::RequestDescriptor;
use crate::transport::HttpTransport;

/// Client for a Subsonic-compatible server.
///
/// Every call performs exactly one HTTP round trip. The configuration is
/// never mutated after construction, so a client can be cloned and shared
/// freely between tasks.
///
/// # Example
///
/// ```ignore
/// use subsonic_client::{ClientConfig, Credentials, SubsonicClient};
///
/// let credentials = Credentials::with_password("alice", "sesame", "my-player");
/// let client = SubsonicClient::new(ClientConfig::new("https://music.example.com", credentials))?;
///
/// client.ping().await?;
/// for genre in client.get_genres().await? {
///     println!("{} ({} songs)", genre.value, genre.song_count.unwrap_or_default());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SubsonicClient {
    transport: HttpTransport,
    config: Arc<ClientConfig>,
}

impl SubsonicClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(Error::Config("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| Error::Config(format!("invalid URL: {}", e)))?;

        if config.credentials.username.is_empty() {
            return Err(Error::Config("username cannot be empty".into()));
        }
        if config.credentials.client_name.is_empty() {
            return Err(Error::Config("client name cannot be empty".into()));
        }

        let config = ClientConfig { url, ..config };
        let transport = HttpTransport::new(&config)?;

        Ok(Self {
            transport,
            config: Arc::new(config),
        })
    }

    /// Get the normalized server URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Call an operation that answers with a structured envelope.
    ///
    /// `T` describes the success payload. Unknown parameter names are
    /// forwarded to the server as given.
    pub async fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        params: CallParameters,
    ) -> Result<T> {
        let request = RequestDescriptor::build(operation, params, &self.config)?;
        let response = self.transport.send(&self.config, &request).await?;
        envelope::decode_response(&response)
    }

    /// Call an operation that answers with raw media.
    pub async fn call_media(&self, operation: &str, params: CallParameters) -> Result<RawMedia> {
        let request = RequestDescriptor::build(operation, params, &self.config)?;
        let response = self.transport.send(&self.config, &request).await?;
        let media = envelope::decode_media(response)?;

        debug!(
            operation = %operation,
            content_type = %media.content_type,
            bytes = media.len(),
            "Fetched media"
        );

        Ok(media)
    }
}
