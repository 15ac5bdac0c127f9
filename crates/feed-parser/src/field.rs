// crates/feed-parser/src/field.rs
//! Canonical field tags
//!
//! Every field name a caller can configure resolves to a [`Field`]. Known
//! names get dedicated extract/clean behavior (see `extract` and `clean`);
//! anything else becomes [`Field::Other`] and is read with the default
//! same-named-key extractor and the default cleaner.

use serde::{Serialize, Serializer};
use std::fmt;

/// Which half of the output a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Show-level fields read from the channel
    Meta,
    /// Per-item fields
    Episodes,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meta => write!(f, "meta"),
            Self::Episodes => write!(f, "episodes"),
        }
    }
}

/// A field tag, resolved from its configured name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Subtitle,
    Image,
    ImageUrl,
    LastUpdated,
    PubDate,
    Link,
    Links,
    Language,
    Editor,
    Author,
    Summary,
    Categories,
    Owner,
    Explicit,
    Complete,
    Blocked,
    Enclosure,
    Duration,
    Order,
    Guid,
    Season,
    Episode,
    EpisodeType,
    Type,
    Ttl,
    NewFeedUrl,
    /// Any name without a dedicated entry
    Other(String),
}

/// Built-in show-level field list
pub static DEFAULT_META_FIELDS: [Field; 15] = [
    Field::Title,
    Field::Description,
    Field::Subtitle,
    Field::Image,
    Field::LastUpdated,
    Field::Link,
    Field::Language,
    Field::Editor,
    Field::Author,
    Field::Summary,
    Field::Categories,
    Field::Owner,
    Field::Explicit,
    Field::Complete,
    Field::Blocked,
];

/// Built-in episode field list
pub static DEFAULT_EPISODE_FIELDS: [Field; 13] = [
    Field::Title,
    Field::Description,
    Field::Subtitle,
    Field::Image,
    Field::PubDate,
    Field::Link,
    Field::Language,
    Field::Enclosure,
    Field::Duration,
    Field::Summary,
    Field::Blocked,
    Field::Explicit,
    Field::Order,
];

impl Field {
    /// Resolves a configured field name
    pub fn from_name(name: &str) -> Self {
        match name {
            "title" => Self::Title,
            "description" => Self::Description,
            "subtitle" => Self::Subtitle,
            "image" => Self::Image,
            "imageURL" => Self::ImageUrl,
            "lastUpdated" => Self::LastUpdated,
            "pubDate" => Self::PubDate,
            "link" => Self::Link,
            "links" => Self::Links,
            "language" => Self::Language,
            "editor" => Self::Editor,
            "author" => Self::Author,
            "summary" => Self::Summary,
            "categories" => Self::Categories,
            "owner" => Self::Owner,
            "explicit" => Self::Explicit,
            "complete" => Self::Complete,
            "blocked" => Self::Blocked,
            "enclosure" => Self::Enclosure,
            "duration" => Self::Duration,
            "order" => Self::Order,
            "guid" => Self::Guid,
            "season" => Self::Season,
            "episode" => Self::Episode,
            "episodeType" => Self::EpisodeType,
            "type" => Self::Type,
            "ttl" => Self::Ttl,
            "newFeedUrl" => Self::NewFeedUrl,
            other => Self::Other(other.to_string()),
        }
    }

    /// The name used as the output key
    pub fn name(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Subtitle => "subtitle",
            Self::Image => "image",
            Self::ImageUrl => "imageURL",
            Self::LastUpdated => "lastUpdated",
            Self::PubDate => "pubDate",
            Self::Link => "link",
            Self::Links => "links",
            Self::Language => "language",
            Self::Editor => "editor",
            Self::Author => "author",
            Self::Summary => "summary",
            Self::Categories => "categories",
            Self::Owner => "owner",
            Self::Explicit => "explicit",
            Self::Complete => "complete",
            Self::Blocked => "blocked",
            Self::Enclosure => "enclosure",
            Self::Duration => "duration",
            Self::Order => "order",
            Self::Guid => "guid",
            Self::Season => "season",
            Self::Episode => "episode",
            Self::EpisodeType => "episodeType",
            Self::Type => "type",
            Self::Ttl => "ttl",
            Self::NewFeedUrl => "newFeedUrl",
            Self::Other(name) => name,
        }
    }

    /// Returns true if the field has no dedicated registry entry
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Other(_))
    }

    /// Built-in field list for a section
    pub fn defaults(section: Section) -> &'static [Field] {
        match section {
            Section::Meta => &DEFAULT_META_FIELDS,
            Section::Episodes => &DEFAULT_EPISODE_FIELDS,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_registry() {
        for field in DEFAULT_META_FIELDS.iter().chain(DEFAULT_EPISODE_FIELDS.iter()) {
            assert_eq!(&Field::from_name(field.name()), field);
            assert!(!field.is_custom());
        }
    }

    #[test]
    fn test_unknown_name_is_custom() {
        let field = Field::from_name("webMaster");
        assert_eq!(field, Field::Other("webMaster".to_string()));
        assert_eq!(field.name(), "webMaster");
        assert!(field.is_custom());
    }

    #[test]
    fn test_default_lists() {
        assert_eq!(Field::defaults(Section::Meta).len(), 15);
        assert_eq!(Field::defaults(Section::Episodes).len(), 13);
        assert_eq!(Field::defaults(Section::Episodes)[12], Field::Order);
    }

    #[test]
    fn test_section_display() {
        assert_eq!(Section::Meta.to_string(), "meta");
        assert_eq!(Section::Episodes.to_string(), "episodes");
    }
}
