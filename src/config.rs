use log::debug;

use crate::runtime::Runtime;

/// Environment variable that overrides the service base URL.
pub const URL_ENV_VAR: &str = "URL";

/// Base URL used when [`URL_ENV_VAR`] is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Settings for talking to the date/time service.
///
/// Built once at startup and handed to [`crate::http::DateTimeClient::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads the base URL from the environment, falling back to [`DEFAULT_BASE_URL`].
    ///
    /// The value is not validated; a malformed URL fails later as a transport error.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime + ?Sized>(runtime: &R) -> Self {
        let base_url = match runtime.env_var(URL_ENV_VAR) {
            Ok(url) => {
                debug!("Using base URL from {}: {}", URL_ENV_VAR, url);
                url
            }
            Err(_) => {
                debug!(
                    "{} not set, using default base URL {}",
                    URL_ENV_VAR, DEFAULT_BASE_URL
                );
                DEFAULT_BASE_URL.to_string()
            }
        };

        Self { base_url }
    }

    /// Replaces the base URL when an explicit one is given (e.g. `--url`).
    pub fn with_base_url_override(self, base_url: Option<String>) -> Self {
        match base_url {
            Some(base_url) => Self { base_url },
            None => self,
        }
    }
}
