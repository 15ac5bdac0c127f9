// crates/network/src/fetcher.rs
//! Fetching feeds and following moved-feed announcements
//!
//! A feed that has changed address keeps serving its old document with a
//! `new-feed-url` element pointing at the new one. The fetcher follows
//! that chain, refusing loops and chains longer than its hop limit, and
//! hands the last document to the parser.

use crate::client::Client;
use crate::error::{NetworkError, NetworkResult};
use log::info;
use podfeed_parser::{moved_to, parse_document, Options, Podcast};
use std::collections::HashSet;

/// Moved-feed hops followed before giving up
pub const DEFAULT_MAX_HOPS: usize = 5;

/// A podcast and where it was finally found
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedFeed {
    /// URL of the document the podcast was built from
    pub url: String,
    /// Number of moved-feed hops followed
    pub hops: usize,
    /// The normalized podcast
    pub podcast: Podcast,
}

/// Retrieves feeds over HTTP
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: Client,
    max_hops: usize,
}

impl FeedFetcher {
    /// Creates a fetcher with the default hop limit
    pub fn new(client: Client) -> Self {
        Self {
            client,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    /// Sets the number of moved-feed hops to follow
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Maximum moved-feed hops
    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Fetches `url`, follows any moves, and assembles the podcast
    pub async fn fetch(&self, url: &str, options: &Options) -> NetworkResult<FetchedFeed> {
        let mut current = url.to_string();
        let mut visited = HashSet::new();
        let mut hops = 0;

        loop {
            visited.insert(current.clone());
            info!("Fetching feed {}", current);

            let body = self.client.get_text(&current).await?;
            let document = parse_document(&body)?;

            match moved_to(&document) {
                Some(next) if next != current => {
                    if visited.contains(&next) {
                        return Err(NetworkError::RedirectLoop { url: next });
                    }
                    if hops >= self.max_hops {
                        return Err(NetworkError::TooManyRedirects {
                            hops: self.max_hops,
                        });
                    }

                    hops += 1;
                    info!("Feed moved from {} to {} (hop {})", current, next, hops);
                    current = next;
                }
                _ => {
                    let podcast = Podcast::from_tree(&document, options)?;
                    return Ok(FetchedFeed {
                        url: current,
                        hops,
                        podcast,
                    });
                }
            }
        }
    }
}
