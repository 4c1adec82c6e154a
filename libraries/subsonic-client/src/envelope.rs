//! Response envelope decoding.
//!
//! Operations either answer with a structured envelope (XML or JSON) or with
//! raw media bytes. The `Content-Type` header decides which; a media call
//! that receives a structured body is treated as a rejected request.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ApiError, Error, Result};
use crate::transport::RawResponse;

const STATUS_OK: &str = "ok";
const STATUS_FAILED: &str = "failed";

/// Decoded structured response.
///
/// The payload type is chosen by the operation that issued the request.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope<T> {
    /// The server accepted the request
    Ok { version: String, payload: T },
    /// The server rejected the request
    Err { version: String, error: ApiError },
}

impl<T> ResponseEnvelope<T> {
    /// Protocol version reported by the server.
    pub fn version(&self) -> &str {
        match self {
            ResponseEnvelope::Ok { version, .. } | ResponseEnvelope::Err { version, .. } => {
                version
            }
        }
    }

    /// Turn a failed envelope into [`Error::Protocol`].
    pub fn into_result(self) -> Result<T> {
        match self {
            ResponseEnvelope::Ok { payload, .. } => Ok(payload),
            ResponseEnvelope::Err { error, .. } => Err(error.into()),
        }
    }
}

/// Raw media returned by streaming operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMedia {
    /// Content type sent by the server, `application/octet-stream` if absent
    pub content_type: String,
    /// Body bytes, untouched
    pub data: Bytes,
}

impl RawMedia {
    /// Number of bytes received.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the body was empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// How a body should be read, judged from its content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Structured XML envelope
    Xml,
    /// Structured JSON envelope
    Json,
    /// Anything else, passed through as bytes
    Media,
}

impl BodyKind {
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return BodyKind::Media;
        };

        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence.ends_with("/xml") || essence.ends_with("+xml") {
            BodyKind::Xml
        } else if essence.ends_with("/json") || essence.ends_with("+json") {
            BodyKind::Json
        } else {
            BodyKind::Media
        }
    }

    pub fn is_structured(self) -> bool {
        !matches!(self, BodyKind::Media)
    }
}

/// Status, version and error shared by every envelope.
#[derive(Debug, Deserialize)]
struct Head {
    #[serde(alias = "@status")]
    status: String,
    #[serde(alias = "@version", default)]
    version: String,
    #[serde(default)]
    error: Option<ApiError>,
}

/// JSON envelopes are wrapped in a single named object.
#[derive(Debug, Deserialize)]
struct JsonRoot<T> {
    #[serde(rename = "subsonic-response")]
    response: T,
}

fn parse<T: DeserializeOwned>(kind: BodyKind, body: &[u8]) -> Result<T> {
    match kind {
        BodyKind::Json => serde_json::from_slice::<JsonRoot<T>>(body)
            .map(|root| root.response)
            .map_err(|e| Error::decode(format!("invalid JSON envelope: {}", e), body)),
        BodyKind::Xml => {
            let text = std::str::from_utf8(body)
                .map_err(|e| Error::decode(format!("XML body is not UTF-8: {}", e), body))?;
            quick_xml::de::from_str(text)
                .map_err(|e| Error::decode(format!("invalid XML envelope: {}", e), body))
        }
        BodyKind::Media => Err(Error::decode("body is not a structured envelope", body)),
    }
}

/// Decode a structured body into an envelope carrying `T`.
pub fn decode_envelope<T: DeserializeOwned>(
    kind: BodyKind,
    body: &[u8],
) -> Result<ResponseEnvelope<T>> {
    let head: Head = parse(kind, body)?;

    match head.status.as_str() {
        STATUS_OK if head.error.is_none() => {
            let payload = parse(kind, body)?;
            Ok(ResponseEnvelope::Ok {
                version: head.version,
                payload,
            })
        }
        STATUS_OK | STATUS_FAILED => match head.error {
            Some(error) => Ok(ResponseEnvelope::Err {
                version: head.version,
                error: error.normalized(),
            }),
            None => Err(Error::decode(
                "envelope reports failure without an error object",
                body,
            )),
        },
        other => Err(Error::decode(
            format!("unknown envelope status {:?}", other),
            body,
        )),
    }
}

/// Decode the response of an envelope operation.
pub fn decode_response<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
    let kind = BodyKind::from_content_type(response.content_type.as_deref());

    if !kind.is_structured() {
        return Err(Error::decode(
            format!(
                "expected a structured response, got HTTP {} with content type {:?}",
                response.status.as_u16(),
                response.content_type.as_deref().unwrap_or_default()
            ),
            &response.body,
        ));
    }

    let envelope = decode_envelope::<T>(kind, &response.body)?;
    if let ResponseEnvelope::Err { error, .. } = &envelope {
        warn!(code = error.code, message = %error.message, "Server returned an error");
    }
    envelope.into_result()
}

/// Decode the response of a streaming operation.
///
/// Bytes are returned untouched unless the content type is structured, in
/// which case the server rejected the request and the envelope is decoded
/// to surface its error.
pub fn decode_media(response: RawResponse) -> Result<RawMedia> {
    let kind = BodyKind::from_content_type(response.content_type.as_deref());

    if kind.is_structured() {
        let envelope = decode_envelope::<serde::de::IgnoredAny>(kind, &response.body)?;
        return match envelope {
            ResponseEnvelope::Err { error, .. } => {
                warn!(code = error.code, message = %error.message, "Server rejected media request");
                Err(error.into())
            }
            ResponseEnvelope::Ok { .. } => Err(Error::decode(
                "expected media, got a success envelope",
                &response.body,
            )),
        };
    }

    if !response.status.is_success() {
        return Err(Error::decode(
            format!("unexpected HTTP status {}", response.status.as_u16()),
            &response.body,
        ));
    }

    let content_type = response
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    debug!(content_type = %content_type, bytes = response.body.len(), "Received media");

    Ok(RawMedia {
        content_type,
        data: response.body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde::de::IgnoredAny;

    const XML_ERROR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<subsonic-response xmlns="http://subsonic.org/restapi" status="failed" version="1.16.1">
    <error code="70" message="Song not found"/>
</subsonic-response>"#;

    fn response(content_type: Option<&str>, body: &[u8]) -> RawResponse {
        RawResponse {
            status: StatusCode::OK,
            content_type: content_type.map(str::to_string),
            body: Bytes::copy_from_slice(body),
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ping {}

    #[derive(Debug, Deserialize, PartialEq)]
    struct LicenseBody {
        license: License,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct License {
        #[serde(alias = "@valid")]
        valid: bool,
    }

    #[test]
    fn test_content_type_classification() {
        assert_eq!(BodyKind::from_content_type(Some("text/xml")), BodyKind::Xml);
        assert_eq!(
            BodyKind::from_content_type(Some("text/xml; charset=UTF-8")),
            BodyKind::Xml
        );
        assert_eq!(
            BodyKind::from_content_type(Some("application/xml")),
            BodyKind::Xml
        );
        assert_eq!(
            BodyKind::from_content_type(Some("Application/JSON;charset=utf-8")),
            BodyKind::Json
        );
        assert_eq!(
            BodyKind::from_content_type(Some("application/vnd.api+json")),
            BodyKind::Json
        );
        assert_eq!(BodyKind::from_content_type(Some("audio/mpeg")), BodyKind::Media);
        assert_eq!(BodyKind::from_content_type(Some("image/jpeg")), BodyKind::Media);
        assert_eq!(BodyKind::from_content_type(None), BodyKind::Media);
    }

    #[test]
    fn test_json_success() {
        let body = br#"{"subsonic-response":{"status":"ok","version":"1.16.1","license":{"valid":true}}}"#;
        let envelope = decode_envelope::<LicenseBody>(BodyKind::Json, body).unwrap();

        assert_eq!(envelope.version(), "1.16.1");
        assert_eq!(
            envelope.into_result().unwrap(),
            LicenseBody {
                license: License { valid: true }
            }
        );
    }

    #[test]
    fn test_xml_success() {
        let body = br#"<subsonic-response status="ok" version="1.16.1"><license valid="true"/></subsonic-response>"#;
        let payload = decode_envelope::<LicenseBody>(BodyKind::Xml, body)
            .unwrap()
            .into_result()
            .unwrap();

        assert!(payload.license.valid);
    }

    #[test]
    fn test_json_error() {
        let body = br#"{"subsonic-response":{"status":"failed","version":"1.16.1","error":{"code":40,"message":"Wrong username or password"}}}"#;
        let envelope = decode_envelope::<Ping>(BodyKind::Json, body).unwrap();
        assert_eq!(envelope.version(), "1.16.1");

        match envelope {
            ResponseEnvelope::Err { error, .. } => {
                assert_eq!(error.code, 40);
                assert_eq!(error.message, "Wrong username or password");
            }
            other => panic!("Expected error envelope, got: {:?}", other),
        }
    }

    #[test]
    fn test_xml_error() {
        let envelope = decode_envelope::<Ping>(BodyKind::Xml, XML_ERROR.as_bytes()).unwrap();

        match envelope.into_result() {
            Err(Error::Protocol { code, message }) => {
                assert_eq!(code, 70);
                assert_eq!(message, "Song not found");
            }
            other => panic!("Expected Protocol error, got: {:?}", other),
        }
    }

    #[test]
    fn test_error_without_message_gets_description() {
        let body = br#"<subsonic-response status="failed" version="1.16.1"><error code="10"/></subsonic-response>"#;
        match decode_envelope::<Ping>(BodyKind::Xml, body).unwrap() {
            ResponseEnvelope::Err { error, .. } => {
                assert_eq!(error.code, 10);
                assert_eq!(error.message, "Required parameter is missing");
            }
            other => panic!("Expected error envelope, got: {:?}", other),
        }
    }

    #[test]
    fn test_failed_without_error_is_decode_error() {
        let body = br#"{"subsonic-response":{"status":"failed","version":"1.16.1"}}"#;
        match decode_envelope::<Ping>(BodyKind::Json, body) {
            Err(Error::Decode { snippet, .. }) => assert!(snippet.contains("failed")),
            other => panic!("Expected Decode error, got: {:?}", other),
        }
    }

    #[test]
    fn test_ok_without_payload_is_decode_error() {
        let body = br#"{"subsonic-response":{"status":"ok","version":"1.16.1"}}"#;
        assert!(matches!(
            decode_envelope::<LicenseBody>(BodyKind::Json, body),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn test_malformed_body_keeps_snippet() {
        match decode_envelope::<Ping>(BodyKind::Json, b"<html>oops</html>") {
            Err(Error::Decode { snippet, .. }) => assert_eq!(snippet, "<html>oops</html>"),
            other => panic!("Expected Decode error, got: {:?}", other),
        }
    }

    #[test]
    fn test_envelope_operation_rejects_media() {
        let raw = response(Some("audio/mpeg"), b"ID3....");
        assert!(matches!(
            decode_response::<IgnoredAny>(&raw),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn test_media_passthrough() {
        let bytes = [0xFF, 0xFB, 0x90, 0x00, 0x3C, 0x7B];
        let media = decode_media(response(Some("audio/mpeg"), &bytes)).unwrap();

        assert_eq!(media.content_type, "audio/mpeg");
        assert_eq!(&media.data[..], &bytes[..]);
    }

    #[test]
    fn test_media_call_surfaces_xml_error() {
        match decode_media(response(Some("text/xml; charset=utf-8"), XML_ERROR.as_bytes())) {
            Err(Error::Protocol { code, message }) => {
                assert_eq!(code, 70);
                assert_eq!(message, "Song not found");
            }
            other => panic!("Expected Protocol error, got: {:?}", other),
        }
    }

    #[test]
    fn test_media_call_rejects_success_envelope() {
        let body = br#"{"subsonic-response":{"status":"ok","version":"1.16.1"}}"#;
        assert!(matches!(
            decode_media(response(Some("application/json"), body)),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn test_media_call_rejects_http_error_page() {
        let mut raw = response(Some("text/html"), b"<h1>Not Found</h1>");
        raw.status = StatusCode::NOT_FOUND;

        match decode_media(raw) {
            Err(Error::Decode { cause, .. }) => assert!(cause.contains("404")),
            other => panic!("Expected Decode error, got: {:?}", other),
        }
    }

    #[test]
    fn test_media_without_content_type() {
        let media = decode_media(response(None, b"\x00\x01")).unwrap();
        assert_eq!(media.content_type, "application/octet-stream");
        assert_eq!(media.len(), 2);
        assert!(!media.is_empty());

        let empty = decode_media(response(Some("image/png"), b"")).unwrap();
        assert!(empty.is_empty());
    }
}
