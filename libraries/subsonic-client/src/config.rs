//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::Credentials;

/// Structured format requested from the server with the `f` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    pub fn as_param(self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
        }
    }
}

/// Configuration for connecting to a Subsonic server.
///
/// Built once and then shared read-only by every call the client makes.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server (e.g., "https://music.example.com")
    pub url: String,
    pub credentials: Credentials,
    pub format: ResponseFormat,
    /// Path segment between the base URL and the operation name
    pub api_path: String,
    /// Deadline for a whole round trip
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Send parameters as a form-encoded POST body instead of a query string
    pub form_post: bool,
    pub user_agent: String,
}

impl ClientConfig {
    pub const DEFAULT_API_PATH: &'static str = "rest";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a config with default transport settings.
    pub fn new(url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            url: url.into(),
            credentials,
            format: ResponseFormat::default(),
            api_path: Self::DEFAULT_API_PATH.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            form_post: false,
            user_agent: format!("subsonic-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = api_path.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_form_post(mut self, form_post: bool) -> Self {
        self.form_post = form_post;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
