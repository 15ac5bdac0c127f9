// crates/feed-parser/src/extract.rs
//! Field extractors: tree node -> raw value
//!
//! Extraction only locates data; it never interprets it. Most fields return
//! the list of matching child elements untouched, which is also what an
//! uncleaned field hands back to the caller.

use crate::field::Field;
use crate::namespace::{NamespaceRole, Namespaces};
use crate::value::Value;
use crate::xml::Node;

/// Reads the raw value of `field` from `node`, or `None` if the feed lacks it
pub fn extract_field(field: &Field, node: &Node, ns: &Namespaces) -> Option<Value> {
    match field {
        Field::LastUpdated => elements(node, "lastBuildDate"),
        Field::Editor => elements(node, "managingEditor"),
        Field::Subtitle => elements(node, &ns.podcast("subtitle")),
        Field::Author => elements(node, &ns.podcast("author")),
        Field::Summary => elements(node, &ns.podcast("summary")),
        Field::Owner => elements(node, &ns.podcast("owner")),
        Field::Explicit => elements(node, &ns.podcast("explicit")),
        Field::Complete => elements(node, &ns.podcast("complete")),
        Field::Blocked => elements(node, &ns.podcast("block")),
        Field::Order => elements(node, &ns.podcast("order")),
        Field::Duration => elements(node, &ns.podcast("duration")),
        Field::Season => elements(node, &ns.podcast("season")),
        Field::Episode => elements(node, &ns.podcast("episode")),
        Field::EpisodeType => elements(node, &ns.podcast("episodeType")),
        Field::Type => elements(node, &ns.podcast("type")),
        Field::NewFeedUrl => elements(node, &ns.podcast("new-feed-url")),
        Field::Links => elements(node, &ns.key(NamespaceRole::Link, "link")),
        Field::Categories => categories(node, ns),
        Field::Image => image_elements(node, ns),
        Field::ImageUrl => image_url(node, ns),
        other => extract_default(node, other.name()),
    }
}

/// Reads the same-named child elements
pub fn extract_default(node: &Node, name: &str) -> Option<Value> {
    elements(node, name)
}

fn elements(node: &Node, key: &str) -> Option<Value> {
    node.children(key)
        .map(|list| Value::List(list.iter().cloned().map(Value::Raw).collect()))
}

fn image_elements(node: &Node, ns: &Namespaces) -> Option<Value> {
    elements(node, "image")
        .or_else(|| elements(node, &ns.podcast("image")))
        .or_else(|| elements(node, &ns.key(NamespaceRole::AltPodcast, "image")))
}

fn image_url(node: &Node, ns: &Namespaces) -> Option<Value> {
    if let Some(url) = node.child("image").and_then(|image| image.child_text("url")) {
        return Some(Value::from(url));
    }

    [ns.podcast("image"), ns.key(NamespaceRole::AltPodcast, "image")]
        .iter()
        .find_map(|key| node.child(key).and_then(|image| image.attribute("href")))
        .map(Value::from)
}

/// Each category becomes `[primary]` or `[primary, sub-category]`
fn categories(node: &Node, ns: &Namespaces) -> Option<Value> {
    let key = ns.podcast("category");
    let entries = node.children(&key)?;

    let categories = entries
        .iter()
        .map(|entry| {
            let mut pair = vec![Value::from(category_text(entry))];
            if let Some(sub) = entry.child(&key) {
                pair.push(Value::from(category_text(sub)));
            }
            Value::List(pair)
        })
        .collect();

    Some(Value::List(categories))
}

fn category_text(entry: &Node) -> &str {
    entry.attribute("text").unwrap_or_else(|| entry.text())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> Node {
        Node::new()
            .with_child("title", Node::text_node("Planet Money"))
            .with_child("lastBuildDate", Node::text_node("Thu, 06 Dec 2018 17:51:50 +0000"))
            .with_child("itunes:author", Node::text_node("NPR"))
            .with_child(
                "itunes:image",
                Node::new().with_attribute("href", "https://example.com/cover.jpg"),
            )
            .with_child(
                "itunes:category",
                Node::new()
                    .with_attribute("text", "Society & Culture")
                    .with_child("itunes:category", Node::new().with_attribute("text", "History")),
            )
            .with_child("itunes:category", Node::new().with_attribute("text", "Business"))
    }

    #[test]
    fn test_default_extractor_reads_same_named_key() {
        let value = extract_field(&Field::Title, &channel(), &Namespaces::default())
            .expect("title present");
        assert_eq!(value, Value::List(vec![Value::Raw(Node::text_node("Planet Money"))]));
    }

    #[test]
    fn test_missing_field_is_absent() {
        let ns = Namespaces::default();
        assert_eq!(extract_field(&Field::Owner, &channel(), &ns), None);
        assert_eq!(extract_field(&Field::Other("booklink".into()), &channel(), &ns), None);
    }

    #[test]
    fn test_renamed_fields() {
        let value = extract_field(&Field::LastUpdated, &channel(), &Namespaces::default());
        assert!(value.is_some());
    }

    #[test]
    fn test_namespaced_lookup_uses_resolved_prefix() {
        let node = Node::new().with_child("pod:author", Node::text_node("Someone"));
        let ns = Namespaces::from_attributes(&[(
            "xmlns:pod".to_string(),
            "http://www.itunes.com/dtds/podcast-1.0.dtd".to_string(),
        )]);

        assert!(extract_field(&Field::Author, &node, &ns).is_some());
        assert!(extract_field(&Field::Author, &node, &Namespaces::default()).is_none());
    }

    #[test]
    fn test_categories_pairs() {
        let value = extract_field(&Field::Categories, &channel(), &Namespaces::default())
            .expect("categories present");
        assert_eq!(
            value,
            Value::List(vec![
                Value::List(vec![Value::from("Society & Culture"), Value::from("History")]),
                Value::List(vec![Value::from("Business")]),
            ])
        );
    }

    #[test]
    fn test_image_fallback_order() {
        let ns = Namespaces::default();
        let value = extract_field(&Field::Image, &channel(), &ns).expect("itunes image");
        let first = value.as_list().and_then(|l| l.first()).and_then(Value::as_raw);
        assert_eq!(
            first.and_then(|n| n.attribute("href")),
            Some("https://example.com/cover.jpg")
        );

        let with_rss_image = channel().with_child(
            "image",
            Node::new().with_child("url", Node::text_node("https://example.com/rss.png")),
        );
        let value = extract_field(&Field::Image, &with_rss_image, &ns).expect("rss image");
        let first = value.as_list().and_then(|l| l.first()).and_then(Value::as_raw);
        assert_eq!(first.and_then(|n| n.child_text("url")), Some("https://example.com/rss.png"));

        let google_only = Node::new().with_child(
            "googleplay:image",
            Node::new().with_attribute("href", "https://example.com/gp.png"),
        );
        assert!(extract_field(&Field::Image, &google_only, &ns).is_some());
    }

    #[test]
    fn test_image_url() {
        let value = extract_field(&Field::ImageUrl, &channel(), &Namespaces::default());
        assert_eq!(value, Some(Value::from("https://example.com/cover.jpg")));
    }
}
