//! Error types for the Subsonic client.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of characters of a response body kept for diagnostics.
const SNIPPET_LEN: usize = 256;

/// Errors that can occur when talking to a Subsonic server.
///
/// The variants separate "my input was invalid" ([`Error::Validation`],
/// [`Error::Config`]), "the network failed" ([`Error::Transport`]), "the server
/// rejected the request" ([`Error::Protocol`]) and "the response was
/// unintelligible" ([`Error::Decode`]).
#[derive(Error, Debug)]
pub enum Error {
    /// A local precondition failed before any request was sent
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// The client configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never completed (connect, DNS, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A body was received but could not be understood
    #[error("Failed to decode response: {cause}")]
    Decode { cause: String, snippet: String },

    /// The server answered with an error envelope
    #[error("Server error {code}: {message}")]
    Protocol { code: i32, message: String },
}

impl Error {
    /// Build a [`Error::Decode`] keeping the head of the offending body.
    pub(crate) fn decode(cause: impl fmt::Display, body: &[u8]) -> Self {
        let snippet = String::from_utf8_lossy(body)
            .chars()
            .take(SNIPPET_LEN)
            .collect();

        Error::Decode {
            cause: cause.to_string(),
            snippet,
        }
    }

    /// The server error code, if this is a protocol error.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::Protocol { code, .. } => Some(ErrorCode::from(*code)),
            _ => None,
        }
    }

    /// Check if the server reported that the requested data does not exist.
    pub fn is_not_found(&self) -> bool {
        self.code() == Some(ErrorCode::NotFound)
    }

    /// Check if the server rejected the credentials or the user's permissions.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.code(),
            Some(
                ErrorCode::WrongCredentials
                    | ErrorCode::TokenAuthNotSupported
                    | ErrorCode::NotAuthorized
            )
        )
    }
}

/// Result type for Subsonic client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes defined by the Subsonic protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Generic,
    MissingParameter,
    ClientMustUpgrade,
    ServerMustUpgrade,
    WrongCredentials,
    TokenAuthNotSupported,
    NotAuthorized,
    TrialExpired,
    NotFound,
    Other(i32),
}

impl ErrorCode {
    /// Canonical description of the code, used when the server sends none.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::Generic => "A generic error",
            ErrorCode::MissingParameter => "Required parameter is missing",
            ErrorCode::ClientMustUpgrade => {
                "Incompatible Subsonic REST protocol version. Client must upgrade"
            }
            ErrorCode::ServerMustUpgrade => {
                "Incompatible Subsonic REST protocol version. Server must upgrade"
            }
            ErrorCode::WrongCredentials => "Wrong username or password",
            ErrorCode::TokenAuthNotSupported => "Token authentication not supported",
            ErrorCode::NotAuthorized => "User is not authorized for the given operation",
            ErrorCode::TrialExpired => "The trial period for the Subsonic server is over",
            ErrorCode::NotFound => "The requested data was not found",
            ErrorCode::Other(_) => "Unknown error",
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        match code {
            0 => ErrorCode::Generic,
            10 => ErrorCode::MissingParameter,
            20 => ErrorCode::ClientMustUpgrade,
            30 => ErrorCode::ServerMustUpgrade,
            40 => ErrorCode::WrongCredentials,
            41 => ErrorCode::TokenAuthNotSupported,
            50 => ErrorCode::NotAuthorized,
            60 => ErrorCode::TrialExpired,
            70 => ErrorCode::NotFound,
            other => ErrorCode::Other(other),
        }
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::Generic => 0,
            ErrorCode::MissingParameter => 10,
            ErrorCode::ClientMustUpgrade => 20,
            ErrorCode::ServerMustUpgrade => 30,
            ErrorCode::WrongCredentials => 40,
            ErrorCode::TokenAuthNotSupported => 41,
            ErrorCode::NotAuthorized => 50,
            ErrorCode::TrialExpired => 60,
            ErrorCode::NotFound => 70,
            ErrorCode::Other(code) => code,
        }
    }
}

/// Error object carried by a failed response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiError {
    #[serde(alias = "@code")]
    pub code: i32,
    #[serde(alias = "@message", default)]
    pub message: String,
}

impl ApiError {
    /// Fill in the canonical description when the server left the message out.
    pub(crate) fn normalized(mut self) -> Self {
        if self.message.trim().is_empty() {
            self.message = ErrorCode::from(self.code).description().to_string();
        }
        self
    }
}

impl From<ApiError> for Error {
    fn from(error: ApiError) -> Self {
        let error = error.normalized();
        Error::Protocol {
            code: error.code,
            message: error.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_from_api_error() {
        let err = Error::from(ApiError {
            code: 70,
            message: "Song not found".to_string(),
        });

        match err {
            Error::Protocol { code, ref message } => {
                assert_eq!(code, 70);
                assert_eq!(message, "Song not found");
            }
            ref e => panic!("Expected Protocol error, got: {:?}", e),
        }
        assert!(err.is_not_found());
        assert!(!err.is_auth_error());
    }

    #[test]
    fn test_empty_message_gets_description() {
        let err = Error::from(ApiError {
            code: 40,
            message: "  ".to_string(),
        });

        match err {
            Error::Protocol { ref message, .. } => {
                assert_eq!(message, "Wrong username or password");
            }
            ref e => panic!("Expected Protocol error, got: {:?}", e),
        }
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_unknown_code_is_forwarded_verbatim() {
        let err = Error::from(ApiError {
            code: 1234,
            message: String::new(),
        });

        assert_eq!(err.code(), Some(ErrorCode::Other(1234)));
        match err {
            Error::Protocol { code, message } => {
                assert_eq!(code, 1234);
                assert!(!message.is_empty());
            }
            e => panic!("Expected Protocol error, got: {:?}", e),
        }
    }

    #[test]
    fn test_code_conversion_is_symmetric() {
        for code in [0, 10, 20, 30, 40, 41, 50, 60, 70, 99] {
            assert_eq!(i32::from(ErrorCode::from(code)), code);
        }
    }

    #[test]
    fn test_decode_snippet_is_truncated() {
        let body = "x".repeat(1000);
        match Error::decode("bad", body.as_bytes()) {
            Error::Decode { cause, snippet } => {
                assert_eq!(cause, "bad");
                assert_eq!(snippet.len(), SNIPPET_LEN);
            }
            e => panic!("Expected Decode error, got: {:?}", e),
        }
    }

    #[test]
    fn test_non_protocol_errors_have_no_code() {
        assert!(Error::Validation("x".into()).code().is_none());
        assert!(Error::Config("x".into()).code().is_none());
    }
}
