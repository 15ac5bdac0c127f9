// crates/feed-parser/src/namespace.rs
//! Namespace prefix resolution
//!
//! Feeds are free to bind the podcast extension schemas to any prefix they
//! like. The prefixes actually declared on the root element are looked up
//! by schema URI, falling back to the conventional prefix when a schema is
//! not declared.

use crate::xml::Node;
use log::debug;

const XMLNS_PREFIX: &str = "xmlns:";

/// The extension schemas field extraction cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceRole {
    /// Apple podcast extension (`itunes:`)
    Podcast,
    /// Google Play podcast extension (`googleplay:`)
    AltPodcast,
    /// Atom syndication links (`atom:`)
    Link,
}

impl NamespaceRole {
    /// Schema URIs identifying the role
    pub fn uris(self) -> &'static [&'static str] {
        match self {
            Self::Podcast => &[
                "http://www.itunes.com/dtds/podcast-1.0.dtd",
                "https://www.itunes.com/dtds/podcast-1.0.dtd",
            ],
            Self::AltPodcast => &[
                "http://www.google.com/schemas/play-podcasts/1.0",
                "https://www.google.com/schemas/play-podcasts/1.0",
            ],
            Self::Link => &["http://www.w3.org/2005/Atom"],
        }
    }

    /// Prefix used when the feed does not declare the schema
    pub fn conventional_prefix(self) -> &'static str {
        match self {
            Self::Podcast => "itunes",
            Self::AltPodcast => "googleplay",
            Self::Link => "atom",
        }
    }
}

/// Resolved prefixes for one feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    podcast: String,
    alt_podcast: String,
    link: String,
}

impl Namespaces {
    /// Resolves prefixes from the root element's `xmlns:*` declarations
    pub fn resolve(root: &Node) -> Self {
        Self::from_attributes(root.attributes())
    }

    /// Resolves prefixes from a list of attribute name/value pairs
    pub fn from_attributes(attributes: &[(String, String)]) -> Self {
        Self {
            podcast: find_prefix(attributes, NamespaceRole::Podcast),
            alt_podcast: find_prefix(attributes, NamespaceRole::AltPodcast),
            link: find_prefix(attributes, NamespaceRole::Link),
        }
    }

    /// Prefix bound to a role
    pub fn prefix(&self, role: NamespaceRole) -> &str {
        match role {
            NamespaceRole::Podcast => &self.podcast,
            NamespaceRole::AltPodcast => &self.alt_podcast,
            NamespaceRole::Link => &self.link,
        }
    }

    /// Qualified lookup key, e.g. `itunes:author`
    pub fn key(&self, role: NamespaceRole, tag: &str) -> String {
        format!("{}:{}", self.prefix(role), tag)
    }

    /// Qualified key in the podcast extension namespace
    pub fn podcast(&self, tag: &str) -> String {
        self.key(NamespaceRole::Podcast, tag)
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Self::from_attributes(&[])
    }
}

fn find_prefix(attributes: &[(String, String)], role: NamespaceRole) -> String {
    let declared = attributes.iter().find_map(|(name, value)| {
        let prefix = name.strip_prefix(XMLNS_PREFIX)?;
        role.uris()
            .contains(&value.as_str())
            .then(|| prefix.to_string())
    });

    match declared {
        Some(prefix) => prefix,
        None => {
            debug!(
                "No declaration for {:?} namespace, using '{}'",
                role,
                role.conventional_prefix()
            );
            role.conventional_prefix().to_string()
        }
    }
}
