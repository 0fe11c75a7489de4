use std::time::Duration;

use thiserror::Error;

/// Failure to get a body back from a catalog endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("endpoint answered with status {0}")]
    Status(u16),
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("could not read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = e.status() {
            TransportError::Status(status.as_u16())
        } else if e.is_body() || e.is_decode() {
            TransportError::Body(e.to_string())
        } else {
            TransportError::Connection(e.to_string())
        }
    }
}

/// A response body that cannot be read as the catalog's format at all.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures that take a whole source out of an aggregation.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("malformed response on page {page}: {error}")]
    MalformedBody {
        page: u32,
        #[source]
        error: ExtractError,
    },
    #[error("scraper task failed: {0}")]
    TaskFailed(String),
    #[error("no result within {0:?}")]
    DeadlineExceeded(Duration),
}
