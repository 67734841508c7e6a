//! Errors produced while fetching the date/time.

/// Ways a single fetch can fail.
///
/// All variants are treated as retryable by [`crate::retry::retry`].
#[derive(Debug)]
pub enum FetchError {
    /// The request never produced a complete response (DNS, connect, timeout,
    /// invalid URL, or the body could not be read).
    Transport(reqwest::Error),
    /// The server answered with a non-2xx status.
    UnexpectedStatus { code: u16 },
    /// The response declared a content type we cannot decode.
    UnsupportedContentType { content_type: String },
    /// A JSON response did not match `{"datetime": "..."}`.
    Decode(serde_json::Error),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "Request failed: {}", e),
            FetchError::UnexpectedStatus { code } => {
                write!(f, "Unexpected status code: {}", code)
            }
            FetchError::UnsupportedContentType { content_type } => {
                write!(f, "Unsupported content type: {:?}", content_type)
            }
            FetchError::Decode(e) => write!(f, "Failed to decode JSON response: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(e) => Some(e),
            FetchError::Decode(e) => Some(e),
            FetchError::UnexpectedStatus { .. } | FetchError::UnsupportedContentType { .. } => {
                None
            }
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e)
    }
}
