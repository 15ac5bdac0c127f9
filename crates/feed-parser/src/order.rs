// crates/feed-parser/src/order.rs
//! Episode ordering
//!
//! Episodes without an explicit `order` come first, newest `pubDate`
//! first. Explicitly ordered episodes follow, highest `order` first.
//! Remaining ties are broken by title, greatest first.

use crate::value::{Record, Value};
use std::cmp::Ordering;

/// Total order over episode objects; sort ascending with this to get feed order
pub fn compare_episodes(a: &Record, b: &Record) -> Ordering {
    match (a.get("order"), b.get("order")) {
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (Some(x), Some(y)) if compare_keys(order_key(x), order_key(y)) != Ordering::Equal => {
            compare_keys(order_key(y), order_key(x))
        }
        _ => compare_keys(key(b.get("pubDate")), key(a.get("pubDate")))
            .then_with(|| compare_keys(key(b.get("title")), key(a.get("title")))),
    }
}

/// Sorts episodes in place
pub fn sort_episodes(episodes: &mut [Record]) {
    episodes.sort_by(compare_episodes);
}

#[derive(Debug)]
enum SortKey<'a> {
    Missing,
    Invalid,
    Flag(bool),
    Number(f64),
    Text(&'a str),
    Opaque,
}

impl SortKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Invalid => 1,
            Self::Flag(_) => 2,
            Self::Number(_) => 3,
            Self::Text(_) => 4,
            Self::Opaque => 5,
        }
    }
}

fn key(value: Option<&Value>) -> SortKey<'_> {
    match value {
        None => SortKey::Missing,
        Some(Value::InvalidDate) | Some(Value::NotANumber) => SortKey::Invalid,
        Some(Value::Bool(b)) => SortKey::Flag(*b),
        Some(Value::Integer(n)) => SortKey::Number(*n as f64),
        Some(other) => match text_of(other) {
            Some(text) => SortKey::Text(text),
            None => SortKey::Opaque,
        },
    }
}

/// Like [`key`], but numeric text compares as a number
fn order_key(value: &Value) -> SortKey<'_> {
    match key(Some(value)) {
        SortKey::Text(text) => match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => SortKey::Number(n),
            _ => SortKey::Text(text),
        },
        other => other,
    }
}

fn text_of(value: &Value) -> Option<&str> {
    match value {
        Value::Text(text) => Some(text),
        Value::Raw(node) => Some(node.text()),
        Value::List(items) if items.len() == 1 => text_of(&items[0]),
        _ => None,
    }
}

fn compare_keys(a: SortKey<'_>, b: SortKey<'_>) -> Ordering {
    match (&a, &b) {
        (SortKey::Flag(x), SortKey::Flag(y)) => x.cmp(y),
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        _ => a.rank().cmp(&b.rank()),
    }
}
