// crates/network/src/lib.rs
//! Feed retrieval over HTTP
//!
//! Wraps `reqwest` with retry for transient failures and follows podcast
//! feeds that announce a new address, handing the final document to
//! `podfeed-parser`.

mod client;
mod error;
mod fetcher;
mod retry;

pub use client::{Client, ClientConfig};
pub use error::{NetworkError, NetworkResult};
pub use fetcher::{FeedFetcher, FetchedFeed, DEFAULT_MAX_HOPS};
pub use retry::{with_retry, RetryPolicy};
