// crates/feed-parser/tests/parser_tests.rs
//! Options, namespace and tree-level tests

use podfeed_parser::{
    build_options, get_info, moved_to, parse_document, parse_podcast, FeedError, Field, Namespaces,
    Options, OptionsParams, Podcast, Section, Value, DEFAULT_EPISODE_FIELDS, DEFAULT_META_FIELDS,
};

fn feed(root_attributes: &str, channel: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" {}>
  <channel>
{}
  </channel>
</rss>"#,
        root_attributes, channel
    )
}

#[test]
fn test_default_options_match_built_in_lists() {
    let options = build_options(None).expect("Should build");
    assert_eq!(options.meta().fields().fields(), &DEFAULT_META_FIELDS[..]);
    assert_eq!(options.episodes().fields().fields(), &DEFAULT_EPISODE_FIELDS[..]);
    assert!(options.meta().required().is_empty());
    assert!(options.episodes().uncleaned().is_empty());
}

#[test]
fn test_repeated_default_sentinel_is_deduplicated() {
    let params = OptionsParams::new()
        .with_fields(Section::Meta, ["default", "webMaster", "title", "default", "webMaster"]);
    let options = build_options(Some(&params)).expect("Should build");

    let mut expected: Vec<&str> = DEFAULT_META_FIELDS.iter().map(Field::name).collect();
    expected.push("webMaster");
    assert_eq!(options.meta().fields().names(), expected);
    assert!(options.meta().fields().includes_defaults());
}

#[test]
fn test_field_list_without_sentinel_replaces_defaults() {
    let params = OptionsParams::new().with_fields(Section::Episodes, ["title", "guid"]);
    let options = build_options(Some(&params)).expect("Should build");

    assert_eq!(options.episodes().fields().names(), vec!["title", "guid"]);
    assert_eq!(options.meta(), Options::defaults().meta());
    assert_eq!(Options::defaults().episodes().fields().fields(), &DEFAULT_EPISODE_FIELDS[..]);
}

#[test]
fn test_options_from_json_file_contents() {
    let json = r#"{
        "fields": { "meta": ["default", "booklink"] },
        "required": { "meta": ["title"], "episodes": ["enclosure"] },
        "uncleaned": { "episodes": ["duration"] },
        "comment": "unknown keys are ignored"
    }"#;
    let options = Options::from_json(json).expect("Should build");

    assert!(options.meta().is_required(&Field::Title));
    assert!(options.episodes().is_required(&Field::Enclosure));
    assert!(options.episodes().is_uncleaned(&Field::Duration));
    assert_eq!(options.meta().fields().names().last(), Some(&"booklink"));
}

#[test]
fn test_options_from_toml() {
    let toml = r#"
[fields]
episodes = ["default", "season", "episode"]

[required]
episodes = ["title"]
"#;
    let params = OptionsParams::from_toml(toml).expect("Should parse");
    let options = build_options(Some(&params)).expect("Should build");

    let names = options.episodes().fields().names();
    assert_eq!(&names[names.len() - 2..], &["season", "episode"]);
    assert!(options.episodes().is_required(&Field::Title));
}

#[test]
fn test_malformed_options_rejected() {
    let result = OptionsParams::from_json(r#"{ "fields": { "meta": "title" } }"#);
    assert!(matches!(result, Err(FeedError::Options(_))));

    let params = OptionsParams::new().with_required(Section::Meta, ["default"]);
    assert!(matches!(build_options(Some(&params)), Err(FeedError::Options(_))));
}

#[test]
fn test_custom_field_uses_same_named_child() {
    let content = feed("", "<title>Show</title>\n<booklink>https://example.com/book</booklink>");
    let params = OptionsParams::new()
        .with_fields(Section::Meta, ["default", "booklink"])
        .with_required(Section::Meta, ["booklink"]);
    let podcast = parse_podcast(&content, Some(&params)).expect("Should parse");

    assert_eq!(podcast.meta.get("booklink"), Some(&Value::from("https://example.com/book")));
}

#[test]
fn test_missing_namespace_falls_back_to_conventional_prefix() {
    let content = feed("", "<title>Show</title>\n<itunes:author>Fallback</itunes:author>");
    let podcast = parse_podcast(&content, None).expect("Should parse");

    assert_eq!(podcast.meta.get("author"), Some(&Value::from("Fallback")));
}

#[test]
fn test_https_podcast_namespace_uri() {
    let content = feed(
        r#"xmlns:it="https://www.itunes.com/dtds/podcast-1.0.dtd""#,
        "<title>Show</title>\n<it:summary>Secure</it:summary>",
    );
    let podcast = parse_podcast(&content, None).expect("Should parse");

    assert_eq!(podcast.meta.get("summary"), Some(&Value::from("Secure")));
}

#[test]
fn test_resolved_prefix_ignores_conventional_spelling() {
    // Bound to "pod", so itunes:author is just an unrelated element
    let content = feed(
        r#"xmlns:pod="http://www.itunes.com/dtds/podcast-1.0.dtd""#,
        "<title>Show</title>\n<itunes:author>Wrong</itunes:author>",
    );
    let podcast = parse_podcast(&content, None).expect("Should parse");

    assert!(!podcast.meta.contains_key("author"));
}

#[test]
fn test_empty_values_are_stripped() {
    let content = feed(
        "",
        r#"<title>Show</title>
<description></description>
<itunes:owner><itunes:name></itunes:name></itunes:owner>
<item><title>Only title</title><enclosure url="" length="" type=""/></item>"#,
    );
    let podcast = parse_podcast(&content, None).expect("Should parse");

    assert_eq!(podcast.meta.keys().collect::<Vec<_>>(), vec!["title"]);
    assert_eq!(podcast.episodes[0].keys().collect::<Vec<_>>(), vec!["title"]);
}

#[test]
fn test_invalid_date_kept_as_marker() {
    let content = feed("", "<item><title>x</title><pubDate>sometime soon</pubDate></item>");
    let podcast = parse_podcast(&content, None).expect("Should parse");

    assert_eq!(podcast.episodes[0].get("pubDate"), Some(&Value::InvalidDate));
    let json = serde_json::to_value(&podcast).expect("Should serialize");
    assert_eq!(json["episodes"][0]["pubDate"], "Invalid Date");
}

#[test]
fn test_unparseable_duration_is_not_a_number() {
    let content = feed("", "<item><itunes:duration>1:2:3:4</itunes:duration></item>");
    let podcast = parse_podcast(&content, None).expect("Should parse");

    // Not-a-number counts as empty and is stripped
    assert!(!podcast.episodes[0].contains_key("duration"));
}

#[test]
fn test_huge_duration_is_stripped_not_fatal() {
    let content = feed(
        "",
        "<item><title>Marathon</title><itunes:duration>99999999999999999:00:00</itunes:duration></item>",
    );
    let podcast = parse_podcast(&content, None).expect("Should parse");

    assert!(!podcast.episodes[0].contains_key("duration"));
}

#[test]
fn test_pub_date_with_wrong_weekday() {
    let content = feed(
        "",
        "<item><title>Off by one</title><pubDate>Tue, 01 Jan 2024 12:00:00 GMT</pubDate></item>",
    );
    let podcast = parse_podcast(&content, None).expect("Should parse");

    assert_eq!(
        podcast.episodes[0].get("pubDate"),
        Some(&Value::from("2024-01-01T12:00:00.000Z"))
    );
}

#[test]
fn test_get_info_on_parsed_tree() {
    let content = feed("", "<item><itunes:duration>1:00:00</itunes:duration></item>");
    let document = parse_document(&content).expect("Should parse");
    let item = document
        .child("rss")
        .and_then(|rss| rss.child("channel"))
        .and_then(|channel| channel.child("item"))
        .expect("item");
    let ns = Namespaces::default();

    assert_eq!(get_info(item, &Field::Duration, false, &ns), Some(Value::Integer(3600)));
    assert!(matches!(get_info(item, &Field::Duration, true, &ns), Some(Value::List(_))));
    assert_eq!(get_info(item, &Field::Title, false, &ns), None);
}

#[test]
fn test_moved_feed_still_parses() {
    let content = feed(
        r#"xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd""#,
        "<title>Old home</title>\n<itunes:new-feed-url> https://example.com/new.xml </itunes:new-feed-url>",
    );
    let document = parse_document(&content).expect("Should parse");
    assert_eq!(moved_to(&document), Some("https://example.com/new.xml".to_string()));

    let podcast = Podcast::from_tree(&document, Options::defaults()).expect("Should assemble");
    assert_eq!(podcast.meta.get("title"), Some(&Value::from("Old home")));
}

#[test]
fn test_not_a_feed() {
    assert!(matches!(parse_podcast("", None), Err(FeedError::Parsing(_))));
    assert!(matches!(parse_podcast("plain text", None), Err(FeedError::Parsing(_))));
    assert!(matches!(
        parse_podcast("<feed><entry/></feed>", None),
        Err(FeedError::Parsing(_))
    ));
}
