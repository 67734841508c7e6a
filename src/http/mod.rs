//! HTTP access to the date/time service.

mod client;
mod content;
mod error;

pub use client::{DATETIME_PATH, DateTimeClient, FetchDateTime, REQUEST_TIMEOUT};
#[cfg(test)]
pub use client::MockFetchDateTime;
pub use content::{ContentKind, DateTimeResponse};
pub use error::FetchError;
