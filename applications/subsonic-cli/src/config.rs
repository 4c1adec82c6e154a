/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use subsonic_client::{AuthMethod, ClientConfig, Credentials, ResponseFormat};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "subsonic.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub client: ClientSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub auth: AuthMode,
}

/// How the password is presented to the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Salted md5 token, fresh salt per request
    #[default]
    Token,
    /// Plaintext `p`
    Plain,
    /// Hex-encoded `p=enc:...`
    Encoded,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientSettings {
    #[serde(default = "default_client_name")]
    pub name: String,

    #[serde(default)]
    pub format: ResponseFormat,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub form_post: bool,
}

impl CliConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (SUBSONIC_SERVER__URL, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("SUBSONIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.url.is_empty() {
            return Err(CliError::Config(
                "server URL is required (set SUBSONIC_SERVER__URL)".to_string(),
            ));
        }

        if self.server.username.is_empty() {
            return Err(CliError::Config(
                "username is required (set SUBSONIC_SERVER__USERNAME)".to_string(),
            ));
        }

        if self.server.password.is_empty() {
            return Err(CliError::Config(
                "password is required (set SUBSONIC_SERVER__PASSWORD)".to_string(),
            ));
        }

        if self.client.timeout_secs == 0 {
            return Err(CliError::Config(
                "client.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the library configuration
    pub fn to_client_config(&self) -> ClientConfig {
        let server = &self.server;
        let credentials = match server.auth {
            AuthMode::Token => Credentials::with_password(
                server.username.as_str(),
                server.password.as_str(),
                self.client.name.as_str(),
            ),
            AuthMode::Plain => Credentials::new(
                server.username.as_str(),
                AuthMethod::Password(server.password.clone()),
                self.client.name.as_str(),
            ),
            AuthMode::Encoded => Credentials::new(
                server.username.as_str(),
                AuthMethod::EncodedPassword(server.password.clone()),
                self.client.name.as_str(),
            ),
        };

        ClientConfig::new(server.url.as_str(), credentials)
            .with_format(self.client.format)
            .with_timeout(Duration::from_secs(self.client.timeout_secs))
            .with_form_post(self.client.form_post)
    }
}

// Default values
fn default_client_name() -> String {
    "subsonic-cli".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            name: default_client_name(),
            format: ResponseFormat::default(),
            timeout_secs: default_timeout_secs(),
            form_post: false,
        }
    }
}
