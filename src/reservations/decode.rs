//! Request body collection and decoding into a `ReservationRequest`.

use axum::body::Body;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use serde_json::{Map, Value};
use thiserror::Error;

use super::models::ReservationRequest;
use crate::common::ApiError;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("JSON body must be an object")]
    NotAnObject,
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        ApiError::MalformedBody(err.to_string())
    }
}

/// Reads the body frame by frame, giving up as soon as `limit` is exceeded.
/// Returning early drops the stream, which releases the connection.
pub async fn collect_body(body: Body, limit: usize) -> Result<Bytes, ApiError> {
    let mut stream = body.into_data_stream();
    let mut buf = BytesMut::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ApiError::BodyRead(e.to_string()))?;
        if buf.len() + chunk.len() > limit {
            return Err(ApiError::PayloadTooLarge(limit));
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf.freeze())
}

pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

/// Decodes JSON when the content type says so, otherwise URL-encoded form data.
pub fn decode_reservation(
    content_type: Option<&str>,
    body: &[u8],
) -> Result<ReservationRequest, DecodeError> {
    if is_json_content_type(content_type) {
        decode_json(body)
    } else {
        Ok(decode_form(body))
    }
}

fn decode_json(body: &[u8]) -> Result<ReservationRequest, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ReservationRequest::default());
    }

    match serde_json::from_slice::<Value>(body)? {
        Value::Object(fields) => Ok(ReservationRequest::from_fields(fields)),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// `application/x-www-form-urlencoded`: `&`-separated pairs, `+` as space,
/// percent-decoded. Later duplicates overwrite earlier ones.
fn decode_form(body: &[u8]) -> ReservationRequest {
    let raw = String::from_utf8_lossy(body);
    let mut fields = Map::new();

    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        fields.insert(form_component(key), Value::String(form_component(value)));
    }

    ReservationRequest::from_fields(fields)
}

fn form_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservations::models::{CHECK_IN, EMAIL, OWNER_NAME};

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type(Some("application/json")));
        assert!(is_json_content_type(Some("Application/JSON; charset=utf-8")));
        assert!(!is_json_content_type(Some("application/x-www-form-urlencoded")));
        assert!(!is_json_content_type(None));
    }

    #[test]
    fn test_decode_json_object() {
        let body = br#"{"owner-name":"Ada","email":"ada@example.com","nights":3}"#;
        let request = decode_reservation(Some("application/json"), body).unwrap();
        assert_eq!(request.field(OWNER_NAME).as_deref(), Some("Ada"));
        assert_eq!(request.field("nights").as_deref(), Some("3"));
    }

    #[test]
    fn test_empty_json_body_is_empty_request() {
        let request = decode_reservation(Some("application/json"), b"  ").unwrap();
        assert!(request.fields().is_empty());
    }

    #[test]
    fn test_json_must_be_object() {
        let err = decode_reservation(Some("application/json"), b"[1,2]").unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject));

        let err = decode_reservation(Some("application/json"), b"{nope").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson(_)));
    }

    #[test]
    fn test_decode_form_percent_and_plus() {
        let body = b"owner-name=Ada+Lovelace&email=ada%40example.com&check-in=2026-10-21&&flag";
        let request = decode_reservation(Some("application/x-www-form-urlencoded"), body).unwrap();
        assert_eq!(request.field(OWNER_NAME).as_deref(), Some("Ada Lovelace"));
        assert_eq!(request.field(EMAIL).as_deref(), Some("ada@example.com"));
        assert_eq!(request.field(CHECK_IN).as_deref(), Some("2026-10-21"));
        assert_eq!(request.field("flag").as_deref(), Some(""));
    }

    #[test]
    fn test_form_last_duplicate_wins() {
        let request = decode_reservation(None, b"email=a%40b.com&email=c%40d.com").unwrap();
        assert_eq!(request.field(EMAIL).as_deref(), Some("c@d.com"));
    }

    #[tokio::test]
    async fn test_collect_body_within_limit() {
        let bytes = collect_body(Body::from("hello"), 5).await.unwrap();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn test_collect_body_over_limit() {
        let err = collect_body(Body::from("hello!"), 5).await.unwrap_err();
        assert!(matches!(err, ApiError::PayloadTooLarge(5)));
    }
}
