// crates/feed-parser/src/builder.rs
//! Building meta and episode objects from tree nodes

use crate::clean::clean_field;
use crate::error::{FeedError, FeedResult};
use crate::extract::extract_field;
use crate::field::{Field, Section};
use crate::namespace::Namespaces;
use crate::options::SectionOptions;
use crate::value::{Record, Value};
use crate::xml::Node;

/// Resolves one field: extract, then clean unless the field is uncleaned
///
/// Absent raw values are returned as-is; this never fails.
pub fn get_info(node: &Node, field: &Field, uncleaned: bool, ns: &Namespaces) -> Option<Value> {
    match extract_field(field, node, ns) {
        Some(raw) if !uncleaned => clean_field(field, raw, ns),
        other => other,
    }
}

/// Builds one object from `node` using a section's configuration
///
/// Required fields are checked on the cleaned values before empty values
/// are stripped. A missing required field discards the whole object.
pub fn build_object(
    node: &Node,
    section: Section,
    options: &SectionOptions,
    ns: &Namespaces,
) -> FeedResult<Record> {
    let resolved: Vec<(&Field, Option<Value>)> = options
        .fields()
        .fields()
        .iter()
        .map(|field| (field, get_info(node, field, options.is_uncleaned(field), ns)))
        .collect();

    for required in options.required() {
        let present = resolved
            .iter()
            .any(|(field, value)| *field == required && value.is_some());
        if !present {
            return Err(FeedError::RequiredField {
                section,
                field: required.name().to_string(),
            });
        }
    }

    Ok(resolved
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .and_then(Value::strip_empty)
                .map(|value| (field.name().to_string(), value))
        })
        .collect())
}

/// Builds one episode object per item, in feed order
pub fn build_episodes(
    items: &[Node],
    options: &SectionOptions,
    ns: &Namespaces,
) -> FeedResult<Vec<Record>> {
    items
        .iter()
        .map(|item| build_object(item, Section::Episodes, options, ns))
        .collect()
}
