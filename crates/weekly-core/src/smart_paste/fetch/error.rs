//! Fetch failure kinds.

use std::fmt;

/// Why a page fetch produced no body.
#[derive(Debug)]
pub enum FetchError {
    /// The URL (or a redirect target) could not be parsed.
    InvalidUrl(String),
    /// Transport-level fault reported by curl (DNS, connect, TLS, reset...).
    Network(curl::Error),
    /// No complete response within the configured timeout.
    Timeout,
    /// Final response status was 400 or above.
    Http(u32),
    /// The abort token was set before or during the transfer.
    Cancelled,
}

impl FetchError {
    /// Maps a curl error onto the fetch taxonomy.
    pub fn from_curl(e: curl::Error) -> Self {
        if e.is_operation_timedout() {
            FetchError::Timeout
        } else if e.is_aborted_by_callback() {
            FetchError::Cancelled
        } else if e.is_url_malformed() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::Network(e)
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidUrl(s) => write!(f, "invalid URL: {}", s),
            FetchError::Network(e) => write!(f, "network error: {}", e),
            FetchError::Timeout => write!(f, "request timeout"),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
            FetchError::Cancelled => write!(f, "request cancelled"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Network(e) => Some(e),
            _ => None,
        }
    }
}
