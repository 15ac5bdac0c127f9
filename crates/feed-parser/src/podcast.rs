// crates/feed-parser/src/podcast.rs
//! Top-level assembly of a podcast from a feed

use crate::builder::{build_episodes, build_object};
use crate::error::{FeedError, FeedResult};
use crate::field::Section;
use crate::namespace::Namespaces;
use crate::options::{build_options, Options, OptionsParams};
use crate::order::sort_episodes;
use crate::value::Record;
use crate::xml::{parse_document, Node};
use log::{debug, warn};
use serde::Serialize;

/// A normalized show and its episodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Podcast {
    /// Show-level fields, in configured order
    pub meta: Record,
    /// Episodes, in feed display order
    pub episodes: Vec<Record>,
}

impl Podcast {
    /// Parses feed text and assembles the podcast
    ///
    /// Logs a warning when the feed announces that it has moved; following
    /// the new address is left to the fetching layer.
    pub fn from_feed(content: &str, options: &Options) -> FeedResult<Self> {
        let document = parse_document(content)?;

        if let Some(url) = moved_to(&document) {
            warn!(
                "Feed includes a new-feed-url element ({}); the feed being parsed may be outdated",
                url
            );
        }

        Self::from_tree(&document, options)
    }

    /// Assembles the podcast from an already-parsed document
    pub fn from_tree(document: &Node, options: &Options) -> FeedResult<Self> {
        let (root, channel) = channel_of(document)?;
        let ns = Namespaces::resolve(root);

        let meta = build_object(channel, Section::Meta, options.meta(), &ns)?;

        let items = channel.children("item").unwrap_or(&[]);
        let mut episodes = build_episodes(items, options.episodes(), &ns)?;
        sort_episodes(&mut episodes);

        debug!("Assembled podcast with {} episodes", episodes.len());
        Ok(Self { meta, episodes })
    }

    /// Number of episodes
    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }
}

/// Builds options from `params` and parses `content` in one step
pub fn parse_podcast(content: &str, params: Option<&OptionsParams>) -> FeedResult<Podcast> {
    let options = build_options(params)?;
    Podcast::from_feed(content, &options)
}

/// Finds the `rss` root element and its `channel`
pub fn channel_of(document: &Node) -> FeedResult<(&Node, &Node)> {
    let root = document
        .child("rss")
        .ok_or_else(|| FeedError::Parsing("missing <rss> root element".to_string()))?;
    let channel = root
        .child("channel")
        .ok_or_else(|| FeedError::Parsing("missing <channel> element".to_string()))?;
    Ok((root, channel))
}

/// The address a feed says it has moved to, if any
pub fn moved_to(document: &Node) -> Option<String> {
    let (root, channel) = channel_of(document).ok()?;
    let ns = Namespaces::resolve(root);

    channel
        .child_text(&ns.podcast("new-feed-url"))
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}
