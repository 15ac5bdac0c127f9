// crates/feed-parser/src/clean.rs
//! Field cleaners: raw value -> normalized value
//!
//! Cleaners never fail. Values that cannot be interpreted degrade to a
//! marker ([`Value::NotANumber`], [`Value::InvalidDate`]) or to `None`.

use crate::field::Field;
use crate::namespace::Namespaces;
use crate::value::{Record, Value};
use crate::xml::Node;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use log::warn;

const LOCAL_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%a, %d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

/// Normalizes the raw value of `field`
pub fn clean_field(field: &Field, raw: Value, ns: &Namespaces) -> Option<Value> {
    match field {
        Field::Enclosure => clean_enclosure(&raw),
        Field::Image => clean_image(&raw),
        Field::ImageUrl => Some(raw),
        Field::Duration => first_text(&raw).map(|text| parse_duration(&text)),
        Field::Ttl | Field::Season | Field::Episode => {
            first_text(&raw).map(|text| parse_integer(&text))
        }
        Field::Owner => clean_owner(&raw, ns),
        Field::Links => clean_links(&raw),
        Field::LastUpdated | Field::PubDate => first_text(&raw).map(|text| parse_date(&text)),
        Field::Complete | Field::Blocked => first_text(&raw).map(|text| Value::Bool(is_yes(&text))),
        Field::Explicit => first_text(&raw).and_then(|text| parse_explicit(&text)),
        Field::EpisodeType | Field::Type => {
            first_text(&raw).map(|text| Value::from(text.trim().to_lowercase()))
        }
        Field::Guid | Field::NewFeedUrl => first_text(&raw).map(|text| Value::from(text.trim())),
        Field::Categories => clean_categories(raw),
        _ => clean_default(raw),
    }
}

/// Unwraps a single-element list to its sole member; anything else passes through
///
/// A sole plain-text element becomes its text.
pub fn clean_default(raw: Value) -> Option<Value> {
    match raw {
        Value::List(mut items) if items.len() == 1 => items.pop().map(unwrap_leaf),
        other => Some(other),
    }
}

fn unwrap_leaf(value: Value) -> Value {
    match value {
        Value::Raw(node) if node.is_leaf() => Value::Text(node.text().to_string()),
        other => other,
    }
}

fn first_node(raw: &Value) -> Option<&Node> {
    match raw {
        Value::Raw(node) => Some(node),
        Value::List(items) => items.first().and_then(Value::as_raw),
        _ => None,
    }
}

fn first_text(raw: &Value) -> Option<String> {
    match raw {
        Value::Text(text) => Some(text.clone()),
        other => first_node(other).map(|node| node.text().to_string()),
    }
}

fn nodes(raw: &Value) -> Vec<&Node> {
    match raw {
        Value::Raw(node) => vec![node],
        Value::List(items) => items.iter().filter_map(Value::as_raw).collect(),
        _ => Vec::new(),
    }
}

fn attribute_record(node: &Node, names: &[&str]) -> Record {
    let mut record = Record::new();
    for name in names {
        match node.attribute(name) {
            Some(value) if !value.is_empty() => record.insert(*name, Value::from(value)),
            _ => {}
        }
    }
    record
}

fn clean_enclosure(raw: &Value) -> Option<Value> {
    first_node(raw).map(|node| Value::Record(attribute_record(node, &["length", "type", "url"])))
}

fn clean_image(raw: &Value) -> Option<Value> {
    let node = first_node(raw)?;
    let mut image = Record::new();

    if node.has_attributes() && !node.has_children() {
        image.insert_some("url", node.attribute("href").map(Value::from));
        return Some(Value::Record(image));
    }

    if node.is_leaf() {
        image.insert("url", Value::from(node.text().trim()));
        return Some(Value::Record(image));
    }

    for name in ["url", "title", "link"] {
        image.insert_some(name, node.child_text(name).map(Value::from));
    }
    for name in ["width", "height"] {
        image.insert_some(name, node.child_text(name).map(parse_integer));
    }

    Some(Value::Record(image))
}

fn clean_owner(raw: &Value, ns: &Namespaces) -> Option<Value> {
    let node = first_node(raw)?;
    let mut owner = Record::new();
    owner.insert_some("name", node.child_text(&ns.podcast("name")).map(Value::from));
    owner.insert_some("email", node.child_text(&ns.podcast("email")).map(Value::from));
    Some(Value::Record(owner))
}

/// Syndication link entry: `{href, type, rel}`, or `None` without attributes
pub fn clean_link(node: &Node) -> Option<Value> {
    if !node.has_attributes() {
        return None;
    }
    Some(Value::Record(attribute_record(node, &["href", "type", "rel"])))
}

fn clean_links(raw: &Value) -> Option<Value> {
    let links: Vec<Value> = nodes(raw).into_iter().filter_map(clean_link).collect();
    if links.is_empty() {
        None
    } else {
        Some(Value::List(links))
    }
}

fn clean_categories(raw: Value) -> Option<Value> {
    match raw {
        Value::List(entries) => Some(Value::List(
            entries
                .into_iter()
                .filter(|entry| {
                    entry
                        .as_list()
                        .and_then(|pair| pair.first())
                        .is_some_and(|primary| !primary.is_empty())
                })
                .collect(),
        )),
        other => Some(other),
    }
}

/// Parses the leading integer of `text`, the way a lenient number reader does
///
/// `"123.5"` reads as 123; text without leading digits is not a number.
pub fn parse_integer(text: &str) -> Value {
    let trimmed = text.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(n) => Value::Integer(sign * n),
        Err(_) => Value::NotANumber,
    }
}

/// Converts a duration to whole seconds
///
/// Parts are positional: `h:m:s`, `m:s`, or plain seconds.
pub fn parse_duration(text: &str) -> Value {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() > 3 {
        return Value::NotANumber;
    }

    let mut total = 0i64;
    for part in parts {
        match parse_integer(part) {
            Value::Integer(n) => match total.checked_mul(60).and_then(|t| t.checked_add(n)) {
                Some(next) => total = next,
                None => return Value::NotANumber,
            },
            _ => return Value::NotANumber,
        }
    }
    Value::Integer(total)
}

/// Re-renders a feed date as an ISO-8601 UTC string with milliseconds
pub fn parse_date(text: &str) -> Value {
    match parse_datetime(text.trim()) {
        Some(dt) => Value::Text(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => {
            warn!("Unparseable feed date: {:?}", text);
            Value::InvalidDate
        }
    }
}

/// Feeds often carry a weekday that disagrees with the date, or spell it in
/// full; the strict parsers reject both, so retry with the weekday dropped
fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    parse_datetime_strict(text).or_else(|| without_weekday(text).and_then(parse_datetime_strict))
}

fn without_weekday(text: &str) -> Option<&str> {
    let (head, rest) = text.split_once(',')?;
    let head = head.trim();
    if !head.is_empty() && head.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(rest.trim_start())
    } else {
        None
    }
}

fn parse_datetime_strict(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    let without_zone = text
        .trim_end_matches(" GMT")
        .trim_end_matches(" UTC")
        .trim_end_matches('Z');
    for format in LOCAL_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(without_zone, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn is_yes(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("yes")
}

/// `yes`/`explicit`/`true` and `clean`/`no`/`false`; anything else is unknown
fn parse_explicit(text: &str) -> Option<Value> {
    match text.trim().to_lowercase().as_str() {
        "yes" | "explicit" | "true" => Some(Value::Bool(true)),
        "clean" | "no" | "false" => Some(Value::Bool(false)),
        _ => None,
    }
}
