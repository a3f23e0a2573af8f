//! Raw response envelope and API error decoding

use crate::error::{Error, Result};
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;

/// Header carrying the server-side request identifier
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A completed HTTP exchange, body not yet decoded
///
/// `T` is the type [`RawResponse::parse`] decodes the body into. The raw
/// resource interfaces return this so callers can inspect status and headers
/// before (or instead of) decoding.
pub struct RawResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RawResponse<T> {
    /// Wrap a received response
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
            _marker: PhantomData,
        }
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Undecoded response body
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as UTF-8 text (lossy)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Server request id, if the response carried one
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
    }

    /// Reinterpret the body as a different target type
    pub fn cast<U>(self) -> RawResponse<U> {
        RawResponse {
            status: self.status,
            headers: self.headers,
            body: self.body,
            _marker: PhantomData,
        }
    }

    /// Decode the body into an arbitrary type
    pub fn json<U: DeserializeOwned>(&self) -> Result<U> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

impl<T: DeserializeOwned> RawResponse<T> {
    /// Decode the body into the endpoint's response type
    pub fn parse(&self) -> Result<T> {
        self.json()
    }
}

impl<T> Clone for RawResponse<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            headers: self.headers.clone(),
            body: self.body.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for RawResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("request_id", &self.request_id())
            .field("body_len", &self.body.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Map a non-success response body to an [`Error`]
///
/// Bodies shaped like `{"errors": [{"code", "title", "detail"}]}` become
/// [`Error::Api`] using the first entry; anything else becomes
/// [`Error::HttpStatus`] with the body text.
pub fn error_from_body(status: u16, body: &[u8]) -> Error {
    let text = String::from_utf8_lossy(body).into_owned();

    let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) else {
        return Error::http_status(status, text);
    };
    let Some(first) = parsed.errors.into_iter().next() else {
        return Error::http_status(status, text);
    };

    let message = match (first.title, first.detail) {
        (Some(title), Some(detail)) => format!("{title}: {detail}"),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => text,
    };
    Error::api(status, first.code.unwrap_or_default(), message)
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ping {
        ok: bool,
    }

    #[test]
    fn test_raw_response_accessors() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req_42"));
        let raw: RawResponse<Ping> =
            RawResponse::new(StatusCode::OK, headers, Bytes::from_static(b"{\"ok\":true}"));

        assert_eq!(raw.status(), StatusCode::OK);
        assert_eq!(raw.request_id(), Some("req_42"));
        assert_eq!(raw.text(), "{\"ok\":true}");
        assert_eq!(raw.parse().unwrap(), Ping { ok: true });
    }

    #[test]
    fn test_raw_response_cast_keeps_body() {
        let raw: RawResponse<Ping> = RawResponse::new(
            StatusCode::CREATED,
            HeaderMap::new(),
            Bytes::from_static(b"{\"ok\":false}"),
        );
        let value = raw.cast::<serde_json::Value>().parse().unwrap();
        assert_eq!(value, json!({"ok": false}));
    }

    #[test]
    fn test_raw_response_parse_error() {
        let raw: RawResponse<Ping> =
            RawResponse::new(StatusCode::OK, HeaderMap::new(), Bytes::from_static(b"<html>"));
        assert!(matches!(raw.parse(), Err(Error::JsonParse(_))));
    }

    #[test]
    fn test_error_from_body_api_shape() {
        let body = json!({
            "errors": [
                {"code": "10007", "title": "Unexpected error", "detail": "Try again later"},
                {"code": "10008", "title": "ignored"}
            ]
        });
        let err = error_from_body(422, body.to_string().as_bytes());
        match err {
            Error::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 422);
                assert_eq!(code, "10007");
                assert_eq!(message, "Unexpected error: Try again later");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_from_body_plain_text() {
        let err = error_from_body(404, b"Not found");
        assert!(matches!(err, Error::HttpStatus { status: 404, ref body } if body == "Not found"));
    }

    #[test]
    fn test_error_from_body_empty_errors() {
        let err = error_from_body(500, b"{\"errors\": []}");
        assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    }
}
