// crates/feed-parser/src/options.rs
//! Caller configuration
//!
//! Callers describe what they want with [`OptionsParams`], the plain
//! serde shape:
//!
//! ```text
//! { fields:    { meta: [..], episodes: [..] },
//!   required:  { meta: [..], episodes: [..] },
//!   uncleaned: { meta: [..], episodes: [..] } }
//! ```
//!
//! [`build_options`] merges that over the built-in defaults and resolves
//! every name to a [`Field`]. A supplied list replaces its section's
//! default list; the `"default"` entry in a field list expands to the
//! built-in list followed by the caller's other entries.

use crate::error::{FeedError, FeedResult};
use crate::field::{Field, Section};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Field-list entry that pulls in the built-in list
pub const DEFAULT_SENTINEL: &str = "default";

static DEFAULT_OPTIONS: LazyLock<Options> = LazyLock::new(|| Options {
    meta: SectionOptions::built_in(Section::Meta),
    episodes: SectionOptions::built_in(Section::Episodes),
});

/// Per-section lists as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<Vec<String>>,
}

impl SectionParams {
    fn get(&self, section: Section) -> Option<&[String]> {
        match section {
            Section::Meta => self.meta.as_deref(),
            Section::Episodes => self.episodes.as_deref(),
        }
    }

    fn set(&mut self, section: Section, names: Vec<String>) {
        match section {
            Section::Meta => self.meta = Some(names),
            Section::Episodes => self.episodes = Some(names),
        }
    }
}

/// Caller configuration, before merging with defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<SectionParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<SectionParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncleaned: Option<SectionParams>,
}

impl OptionsParams {
    /// Creates empty parameters (everything defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads parameters from JSON text
    pub fn from_json(content: &str) -> FeedResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads parameters from an already-parsed JSON value
    pub fn from_json_value(value: serde_json::Value) -> FeedResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Reads parameters from TOML text
    pub fn from_toml(content: &str) -> FeedResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Sets the field list for a section
    pub fn with_fields<I, S>(mut self, section: Section, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        set_list(&mut self.fields, section, names);
        self
    }

    /// Sets the required list for a section
    pub fn with_required<I, S>(mut self, section: Section, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        set_list(&mut self.required, section, names);
        self
    }

    /// Sets the uncleaned list for a section
    pub fn with_uncleaned<I, S>(mut self, section: Section, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        set_list(&mut self.uncleaned, section, names);
        self
    }
}

fn set_list<I, S>(slot: &mut Option<SectionParams>, section: Section, names: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    slot.get_or_insert_with(SectionParams::default)
        .set(section, names.into_iter().map(Into::into).collect());
}

/// Resolved, deduplicated field list
#[derive(Debug, Clone, PartialEq)]
pub struct FieldList {
    include_defaults: bool,
    fields: Vec<Field>,
}

impl FieldList {
    fn built_in(section: Section) -> Self {
        Self {
            include_defaults: true,
            fields: Field::defaults(section).to_vec(),
        }
    }

    /// Resolves configured names, expanding the `"default"` entry
    pub fn from_names(section: Section, names: &[String]) -> FeedResult<Self> {
        check_names(section, "fields", names)?;

        let include_defaults = names.iter().any(|name| name == DEFAULT_SENTINEL);
        let custom = names
            .iter()
            .filter(|name| name.as_str() != DEFAULT_SENTINEL)
            .map(|name| Field::from_name(name));

        let fields = if include_defaults {
            dedupe(Field::defaults(section).iter().cloned().chain(custom))
        } else {
            dedupe(custom)
        };

        Ok(Self {
            include_defaults,
            fields,
        })
    }

    /// Returns true if the built-in list is part of this list
    pub fn includes_defaults(&self) -> bool {
        self.include_defaults
    }

    /// Fields in output order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field names in output order
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(Field::name).collect()
    }
}

/// Everything configured for one section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOptions {
    fields: FieldList,
    required: Vec<Field>,
    uncleaned: Vec<Field>,
}

impl SectionOptions {
    fn built_in(section: Section) -> Self {
        Self {
            fields: FieldList::built_in(section),
            required: Vec::new(),
            uncleaned: Vec::new(),
        }
    }

    /// Configured field list
    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    /// Fields that must resolve to a value
    pub fn required(&self) -> &[Field] {
        &self.required
    }

    /// Fields returned without cleaning
    pub fn uncleaned(&self) -> &[Field] {
        &self.uncleaned
    }

    /// Returns true if `field` must resolve to a value
    pub fn is_required(&self, field: &Field) -> bool {
        self.required.contains(field)
    }

    /// Returns true if `field` skips cleaning
    pub fn is_uncleaned(&self, field: &Field) -> bool {
        self.uncleaned.contains(field)
    }
}

/// Resolved configuration for one call
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    meta: SectionOptions,
    episodes: SectionOptions,
}

impl Options {
    /// The process-wide built-in configuration
    pub fn defaults() -> &'static Options {
        &DEFAULT_OPTIONS
    }

    /// Merges caller parameters over a copy of the defaults
    pub fn from_params(params: &OptionsParams) -> FeedResult<Self> {
        let mut options = Self::defaults().clone();

        for section in [Section::Meta, Section::Episodes] {
            let target = options.section_mut(section);

            if let Some(names) = params.fields.as_ref().and_then(|p| p.get(section)) {
                target.fields = FieldList::from_names(section, names)?;
            }
            if let Some(names) = params.required.as_ref().and_then(|p| p.get(section)) {
                target.required = resolve_set(section, "required", names)?;
            }
            if let Some(names) = params.uncleaned.as_ref().and_then(|p| p.get(section)) {
                target.uncleaned = resolve_set(section, "uncleaned", names)?;
            }
        }

        Ok(options)
    }

    /// Parses JSON parameters and merges them over the defaults
    pub fn from_json(content: &str) -> FeedResult<Self> {
        Self::from_params(&OptionsParams::from_json(content)?)
    }

    /// Options for one section
    pub fn section(&self, section: Section) -> &SectionOptions {
        match section {
            Section::Meta => &self.meta,
            Section::Episodes => &self.episodes,
        }
    }

    /// Show-level options
    pub fn meta(&self) -> &SectionOptions {
        &self.meta
    }

    /// Episode options
    pub fn episodes(&self) -> &SectionOptions {
        &self.episodes
    }

    fn section_mut(&mut self, section: Section) -> &mut SectionOptions {
        match section {
            Section::Meta => &mut self.meta,
            Section::Episodes => &mut self.episodes,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::defaults().clone()
    }
}

/// Builds options for one call; `None` yields the built-in defaults
pub fn build_options(params: Option<&OptionsParams>) -> FeedResult<Options> {
    match params {
        None => Ok(Options::default()),
        Some(params) => Options::from_params(params),
    }
}

fn check_names(section: Section, list: &str, names: &[String]) -> FeedResult<()> {
    match names.iter().find(|name| name.trim().is_empty()) {
        Some(_) => Err(FeedError::Options(format!(
            "{}.{} contains an empty field name",
            list, section
        ))),
        None => Ok(()),
    }
}

fn resolve_set(section: Section, list: &str, names: &[String]) -> FeedResult<Vec<Field>> {
    check_names(section, list, names)?;

    if names.iter().any(|name| name == DEFAULT_SENTINEL) {
        return Err(FeedError::Options(format!(
            "'{}' is only valid in field lists, found in {}.{}",
            DEFAULT_SENTINEL, list, section
        )));
    }

    Ok(dedupe(names.iter().map(|name| Field::from_name(name))))
}

fn dedupe(fields: impl Iterator<Item = Field>) -> Vec<Field> {
    let mut out: Vec<Field> = Vec::new();
    for field in fields {
        if !out.contains(&field) {
            out.push(field);
        }
    }
    out
}
