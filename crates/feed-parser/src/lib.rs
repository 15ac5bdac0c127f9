// crates/feed-parser/src/lib.rs
//! Podcast feed normalizer
//!
//! Turns an RSS podcast feed, with its optional namespaces, alternate tag
//! spellings and inconsistent encodings, into a stable description of a
//! show (`meta`) and its episodes:
//! - Namespace prefixes are resolved from the feed's own declarations
//! - Each configured field is extracted, then cleaned into a normal form
//! - Required fields are enforced, empty values stripped
//! - Episodes are put in display order
//!
//! # Example
//!
//! ```rust
//! use podfeed_parser::{parse_podcast, OptionsParams, Section, Value};
//!
//! let rss = r#"<?xml version="1.0"?>
//! <rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
//!   <channel>
//!     <title>My Podcast</title>
//!     <item>
//!       <title>Episode 1</title>
//!       <itunes:duration>39:58</itunes:duration>
//!     </item>
//!   </channel>
//! </rss>"#;
//!
//! let params = OptionsParams::new()
//!     .with_required(Section::Meta, ["title"]);
//! let podcast = parse_podcast(rss, Some(&params)).expect("Failed to parse feed");
//!
//! assert_eq!(podcast.meta.get("title"), Some(&Value::from("My Podcast")));
//! assert_eq!(podcast.episodes[0].get("duration"), Some(&Value::Integer(2398)));
//! ```

mod builder;
mod clean;
mod error;
mod extract;
mod field;
mod namespace;
mod options;
mod order;
mod podcast;
mod value;
mod xml;

pub use builder::{build_episodes, build_object, get_info};
pub use clean::{clean_default, clean_field, clean_link, parse_date, parse_duration, parse_integer};
pub use error::{FeedError, FeedResult};
pub use extract::{extract_default, extract_field};
pub use field::{Field, Section, DEFAULT_EPISODE_FIELDS, DEFAULT_META_FIELDS};
pub use namespace::{NamespaceRole, Namespaces};
pub use options::{
    build_options, FieldList, Options, OptionsParams, SectionOptions, SectionParams,
    DEFAULT_SENTINEL,
};
pub use order::{compare_episodes, sort_episodes};
pub use podcast::{channel_of, moved_to, parse_podcast, Podcast};
pub use value::{Record, Value, INVALID_DATE};
pub use xml::{parse_document, Node, ATTRIBUTES_KEY, TEXT_KEY};
