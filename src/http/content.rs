//! Content-type driven decoding of date/time responses.

use serde::Deserialize;

use super::error::FetchError;

const JSON: &str = "application/json";
const PLAIN_TEXT: &str = "text/plain";

/// JSON body returned by the service.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct DateTimeResponse {
    pub datetime: String,
}

/// How a response body should be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    /// Exactly `application/json`.
    Json,
    /// Anything starting with `text/plain`, parameters included.
    PlainText,
    /// Everything else, carrying the declared value (empty if the header was missing).
    Unsupported(String),
}

impl ContentKind {
    pub fn classify(content_type: &str) -> Self {
        if content_type == JSON {
            ContentKind::Json
        } else if content_type.starts_with(PLAIN_TEXT) {
            ContentKind::PlainText
        } else {
            ContentKind::Unsupported(content_type.to_string())
        }
    }

    /// Extracts the date/time string from a fully read body.
    pub fn decode(self, body: &[u8]) -> Result<String, FetchError> {
        match self {
            ContentKind::Json => {
                let response: DateTimeResponse = serde_json::from_slice(body)?;
                Ok(response.datetime)
            }
            ContentKind::PlainText => Ok(String::from_utf8_lossy(body).into_owned()),
            ContentKind::Unsupported(content_type) => {
                Err(FetchError::UnsupportedContentType { content_type })
            }
        }
    }
}
