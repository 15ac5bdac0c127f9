// crates/feed-parser/examples/parse_feed.rs
//! Example of normalizing a podcast feed

use podfeed_parser::{parse_podcast, OptionsParams, Section, Value};

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>History Hour</title>
    <description>Stories from the past, one hour at a time</description>
    <link>https://example.com/history-hour</link>
    <language>en</language>
    <itunes:author>History Hour Productions</itunes:author>
    <itunes:explicit>clean</itunes:explicit>
    <itunes:category text="Society &amp; Culture">
      <itunes:category text="History"/>
    </itunes:category>
    <item>
      <title>The Fall of Rome</title>
      <pubDate>Mon, 01 Jan 2024 12:00:00 GMT</pubDate>
      <itunes:duration>25:30</itunes:duration>
      <itunes:season>1</itunes:season>
      <enclosure url="https://example.com/ep1.mp3" type="audio/mpeg" length="12345678"/>
    </item>
    <item>
      <title>The Printing Press</title>
      <pubDate>Tue, 02 Jan 2024 12:00:00 GMT</pubDate>
      <itunes:duration>1:02:15</itunes:duration>
      <itunes:season>1</itunes:season>
      <enclosure url="https://example.com/ep2.mp3" type="audio/mpeg" length="23456789"/>
    </item>
  </channel>
</rss>"#;

fn main() {
    env_logger::init();

    println!("=== Podcast Feed Normalizer Demo ===\n");

    println!("Example 1: Default options");
    println!("{}", "=".repeat(60));
    default_example();

    println!("\n");

    println!("Example 2: Custom fields and raw values");
    println!("{}", "=".repeat(60));
    custom_example();
}

fn default_example() {
    match parse_podcast(FEED, None) {
        Ok(podcast) => {
            if let Some(title) = podcast.meta.get("title").and_then(Value::as_text) {
                println!("Show: {}", title);
            }
            println!("Episodes: {}", podcast.episode_count());

            for episode in &podcast.episodes {
                let title = episode.get("title").and_then(Value::as_text).unwrap_or("?");
                let seconds = episode.get("duration").and_then(Value::as_integer).unwrap_or(0);
                println!("  - {} ({}m {}s)", title, seconds / 60, seconds % 60);
            }
        }
        Err(e) => eprintln!("Failed to parse feed: {}", e),
    }
}

fn custom_example() {
    let params = OptionsParams::new()
        .with_fields(Section::Episodes, ["default", "season"])
        .with_required(Section::Episodes, ["enclosure"])
        .with_uncleaned(Section::Episodes, ["duration"]);

    match parse_podcast(FEED, Some(&params)) {
        Ok(podcast) => match serde_json::to_string_pretty(&podcast) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to render JSON: {}", e),
        },
        Err(e) => eprintln!("Failed to parse feed: {}", e),
    }
}
