// crates/feed-parser/src/error.rs
//! Error types for feed normalization

use crate::field::Section;
use thiserror::Error;

/// Result type for feed parser operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors that can occur while turning a feed into a [`crate::Podcast`]
///
/// All three are fatal to the current call. Field cleaners never produce
/// errors; malformed values degrade to marker values instead.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed text could not be turned into a usable tree
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// A field configured as required resolved to nothing
    #[error("Required {section} field '{field}' is missing from feed")]
    RequiredField { section: Section, field: String },

    /// The caller's configuration has an invalid shape
    #[error("Invalid options: {0}")]
    Options(String),
}

impl FeedError {
    /// Returns true if the error came from required-field validation
    pub fn is_required_field(&self) -> bool {
        matches!(self, FeedError::RequiredField { .. })
    }
}

impl From<quick_xml::Error> for FeedError {
    fn from(err: quick_xml::Error) -> Self {
        FeedError::Parsing(err.to_string())
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Options(err.to_string())
    }
}

impl From<toml::de::Error> for FeedError {
    fn from(err: toml::de::Error) -> Self {
        FeedError::Options(err.to_string())
    }
}
