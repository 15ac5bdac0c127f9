// crates/network/src/error.rs
//! Error types for feed retrieval

use podfeed_parser::FeedError;
use thiserror::Error;

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur while fetching a feed
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Fetched document could not be turned into a podcast
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// A moved feed points back at an address already visited
    #[error("Feed redirect loop at {url}")]
    RedirectLoop { url: String },

    /// Moved-feed chain is longer than allowed
    #[error("Too many feed redirects (more than {hops})")]
    TooManyRedirects { hops: usize },

    /// Every attempt failed with a retryable error
    #[error("Gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: usize, last_error: String },
}

impl NetworkError {
    /// Returns true if the error is retryable
    ///
    /// Transport failures and 5xx responses are; 4xx responses are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::Http(e) => {
                !e.is_builder() && !e.status().is_some_and(|s| s.is_client_error())
            }
            NetworkError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the error is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        match self {
            NetworkError::Status { status, .. } => (400..500).contains(status),
            NetworkError::Http(e) => e.status().is_some_and(|s| s.is_client_error()),
            _ => false,
        }
    }
}
