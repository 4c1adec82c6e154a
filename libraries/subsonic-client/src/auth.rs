//! Credentials and authentication parameters.

use std::fmt;

use md5::{Digest, Md5};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::params::CallParameters;

/// Protocol version advertised when none is configured.
pub const DEFAULT_PROTOCOL_VERSION: &str = "1.16.1";

/// Length of the random salt generated for salted-token authentication.
const SALT_LEN: usize = 12;

/// How the user proves their identity to the server.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Plaintext password sent as `p`.
    Password(String),
    /// Password sent hex-encoded as `p=enc:<hex>`.
    EncodedPassword(String),
    /// Pre-computed `t = md5(password + salt)` and its salt.
    Token { token: String, salt: String },
    /// Password hashed with a fresh random salt on every request.
    SaltedPassword(String),
}

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::Password(_) => f.write_str("Password(<redacted>)"),
            AuthMethod::EncodedPassword(_) => f.write_str("EncodedPassword(<redacted>)"),
            AuthMethod::Token { .. } => f.write_str("Token(<redacted>)"),
            AuthMethod::SaltedPassword(_) => f.write_str("SaltedPassword(<redacted>)"),
        }
    }
}

/// Identity of the user and of the client application.
///
/// Immutable once the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub auth: AuthMethod,
    /// Client application name sent as `c`
    pub client_name: String,
    /// Protocol version sent as `v`
    pub protocol_version: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        auth: AuthMethod,
        client_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            auth,
            client_name: client_name.into(),
            protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
        }
    }

    /// Salted-token credentials derived from a plaintext password.
    pub fn with_password(
        username: impl Into<String>,
        password: impl Into<String>,
        client_name: impl Into<String>,
    ) -> Self {
        Self::new(
            username,
            AuthMethod::SaltedPassword(password.into()),
            client_name,
        )
    }

    #[must_use]
    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    /// Append `u` and the secret (`p`, or `t` and `s`) to `params`.
    pub(crate) fn encode_auth(&self, params: &mut CallParameters) {
        params.add("u", &self.username);

        match &self.auth {
            AuthMethod::Password(password) => {
                params.add("p", password);
            }
            AuthMethod::EncodedPassword(password) => {
                params.add("p", format!("enc:{}", hex::encode(password)));
            }
            AuthMethod::Token { token, salt } => {
                params.add("t", token).add("s", salt);
            }
            AuthMethod::SaltedPassword(password) => {
                let salt = generate_salt();
                params.add("t", token_for(password, &salt)).add("s", salt);
            }
        }
    }
}

/// Compute the authentication token `md5(password + salt)` as lowercase hex.
pub fn token_for(password: &str, salt: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

fn generate_salt() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LEN)
        .map(char::from)
        .collect()
}
