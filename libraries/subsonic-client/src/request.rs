//! Request construction.
//!
//! Merges the caller's parameters with the identity, version, format and
//! authentication parameters every Subsonic request carries.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::params::CallParameters;

/// Parameter names injected by the client on every request.
///
/// Callers may not use them; a collision is reported as a configuration
/// error instead of silently picking one value.
pub const RESERVED_KEYS: [&str; 7] = ["u", "p", "t", "s", "c", "v", "f"];

/// HTTP verb used to submit a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
}

impl From<HttpVerb> for reqwest::Method {
    fn from(verb: HttpVerb) -> Self {
        match verb {
            HttpVerb::Get => reqwest::Method::GET,
            HttpVerb::Post => reqwest::Method::POST,
        }
    }
}

/// A fully resolved request, submitted exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    verb: HttpVerb,
    operation: String,
    params: CallParameters,
}

impl RequestDescriptor {
    /// Build the request for `operation` from the caller's parameters.
    ///
    /// Caller parameters come first, in their original order, followed by
    /// the injected ones.
    pub fn build(
        operation: &str,
        caller: CallParameters,
        config: &ClientConfig,
    ) -> Result<Self> {
        if operation.is_empty() || operation.contains('/') {
            return Err(Error::Config(format!(
                "invalid operation name: {:?}",
                operation
            )));
        }

        if let Some(key) = RESERVED_KEYS.iter().find(|key| caller.contains_key(key)) {
            return Err(Error::Config(format!(
                "parameter '{}' is reserved for authentication and client identity",
                key
            )));
        }

        let credentials = &config.credentials;
        let mut params = caller;
        credentials.encode_auth(&mut params);
        params
            .add("c", &credentials.client_name)
            .add("v", &credentials.protocol_version)
            .add("f", config.format.as_param());

        let verb = if config.form_post {
            HttpVerb::Post
        } else {
            HttpVerb::Get
        };

        Ok(Self {
            verb,
            operation: operation.to_string(),
            params,
        })
    }

    pub fn verb(&self) -> HttpVerb {
        self.verb
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn params(&self) -> &CallParameters {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthMethod, Credentials};
    use crate::config::ResponseFormat;

    fn config() -> ClientConfig {
        ClientConfig::new(
            "https://music.example.com",
            Credentials::new("alice", AuthMethod::Password("secret".into()), "tester")
                .with_protocol_version("1.15.0"),
        )
    }

    #[test]
    fn test_injects_identity_and_auth() {
        let caller = CallParameters::new().with("id", "42");
        let request = RequestDescriptor::build("getSong", caller, &config()).unwrap();

        let params = request.params();
        assert_eq!(request.operation(), "getSong");
        assert_eq!(request.verb(), HttpVerb::Get);
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("u"), Some("alice"));
        assert_eq!(params.get("p"), Some("secret"));
        assert_eq!(params.get("c"), Some("tester"));
        assert_eq!(params.get("v"), Some("1.15.0"));
        assert_eq!(params.get("f"), Some("json"));
    }

    #[test]
    fn test_caller_parameters_come_first() {
        let caller = CallParameters::new().with("id", "1").with("id", "2");
        let request = RequestDescriptor::build("star", caller, &config()).unwrap();

        let keys: Vec<_> = request.params().iter().map(|(k, _)| k).collect();
        assert_eq!(&keys[..2], &["id", "id"]);
    }

    #[test]
    fn test_requested_format() {
        let config = config().with_format(ResponseFormat::Xml);
        let request = RequestDescriptor::build("ping", CallParameters::new(), &config).unwrap();

        assert_eq!(request.params().get("f"), Some("xml"));
    }

    #[test]
    fn test_form_post_switches_verb() {
        let config = config().with_form_post(true);
        let request = RequestDescriptor::build("ping", CallParameters::new(), &config).unwrap();

        assert_eq!(request.verb(), HttpVerb::Post);
    }

    #[test]
    fn test_reserved_key_collision_is_rejected() {
        for key in RESERVED_KEYS {
            let caller = CallParameters::new().with(key, "x");
            match RequestDescriptor::build("ping", caller, &config()) {
                Err(Error::Config(msg)) => assert!(msg.contains(key)),
                other => panic!("Expected Config error for {}, got: {:?}", key, other),
            }
        }
    }

    #[test]
    fn test_invalid_operation_name() {
        assert!(RequestDescriptor::build("", CallParameters::new(), &config()).is_err());
        assert!(RequestDescriptor::build("../admin", CallParameters::new(), &config()).is_err());
    }
}
