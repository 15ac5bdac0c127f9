// FILE: crates/cli/src/commands.rs

use anyhow::{Context, Result};
use clap::ArgMatches;
use console::style;
use podfeed_network::{Client, ClientConfig, FeedFetcher, RetryPolicy, DEFAULT_MAX_HOPS};
use podfeed_parser::{build_options, Options, OptionsParams, Podcast};
use std::path::Path;

/// Normalize a feed read from disk
pub fn parse_file(matches: &ArgMatches) -> Result<()> {
    let file_path = matches
        .get_one::<String>("file")
        .ok_or_else(|| anyhow::anyhow!("Feed file is required"))?;
    let options = load_options(matches.get_one::<String>("options").map(String::as_str))?;

    let podcast = parse_feed_file(Path::new(file_path), &options)?;
    println!("{}", render(&podcast, matches.get_flag("compact"))?);
    Ok(())
}

/// Fetch a feed over HTTP, following moved-feed announcements
pub async fn fetch_url(matches: &ArgMatches) -> Result<()> {
    let url = matches
        .get_one::<String>("url")
        .ok_or_else(|| anyhow::anyhow!("Feed URL is required"))?;
    let options = load_options(matches.get_one::<String>("options").map(String::as_str))?;
    let max_hops = matches
        .get_one::<usize>("max-hops")
        .copied()
        .unwrap_or(DEFAULT_MAX_HOPS);

    let config = client_config(matches.get_one::<usize>("retries").copied());
    let client = Client::with_config(config).context("Failed to create HTTP client")?;
    let fetched = FeedFetcher::new(client)
        .with_max_hops(max_hops)
        .fetch(url, &options)
        .await
        .with_context(|| format!("Failed to fetch feed {}", url))?;

    if fetched.hops > 0 {
        eprintln!(
            "{} feed moved {} time(s), now at {}",
            style("note:").yellow().bold(),
            fetched.hops,
            style(&fetched.url).cyan()
        );
    }

    println!("{}", render(&fetched.podcast, matches.get_flag("compact"))?);
    Ok(())
}

/// HTTP settings, with an optional attempt count overriding the default retry policy
pub fn client_config(retries: Option<usize>) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(attempts) = retries {
        config.retry_policy = Some(RetryPolicy::new(attempts));
    }
    config
}

/// Read and normalize a feed file
pub fn parse_feed_file(path: &Path, options: &Options) -> Result<Podcast> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read feed file {}", path.display()))?;
    Podcast::from_feed(&content, options)
        .with_context(|| format!("Failed to parse feed {}", path.display()))
}

/// Load options from a JSON (`.json`) or TOML file, or the defaults
pub fn load_options(path: Option<&str>) -> Result<Options> {
    let Some(path) = path else {
        return Ok(Options::default());
    };

    let path = Path::new(path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let params = if is_json {
        OptionsParams::from_json(&content)
    } else {
        OptionsParams::from_toml(&content)
    }
    .with_context(|| format!("Invalid options file {}", path.display()))?;

    build_options(Some(&params)).context("Invalid options")
}

/// Serialize a podcast as JSON
pub fn render(podcast: &Podcast, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(podcast)
    } else {
        serde_json::to_string_pretty(podcast)
    };
    json.context("Failed to serialize podcast")
}

#[cfg(test)]
mod tests {
    use super::*;
    use podfeed_parser::{Field, Value};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>CLI Show</title>
    <item>
      <title>Episode 1</title>
      <itunes:duration>1:00</itunes:duration>
    </item>
  </channel>
</rss>"#;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Should create temp file");
        file.write_all(content.as_bytes()).expect("Should write");
        file
    }

    #[test]
    fn test_load_options_defaults() {
        let options = load_options(None).expect("Should load");
        assert_eq!(&options, Options::defaults());
    }

    #[test]
    fn test_load_options_json() {
        let file = temp_file(".json", r#"{ "required": { "meta": ["title"] } }"#);
        let options = load_options(file.path().to_str()).expect("Should load");
        assert!(options.meta().is_required(&Field::Title));
    }

    #[test]
    fn test_load_options_toml() {
        let file = temp_file(".toml", "[uncleaned]\nepisodes = [\"duration\"]\n");
        let options = load_options(file.path().to_str()).expect("Should load");
        assert!(options.episodes().is_uncleaned(&Field::Duration));
    }

    #[test]
    fn test_load_options_missing_file() {
        assert!(load_options(Some("/nonexistent/options.json")).is_err());
    }

    #[test]
    fn test_load_options_invalid() {
        let file = temp_file(".json", r#"{ "fields": { "meta": ["default", ""] } }"#);
        assert!(load_options(file.path().to_str()).is_err());
    }

    #[test]
    fn test_client_config_retries() {
        let default_attempts = client_config(None).retry_policy.map(|p| p.max_attempts());
        assert_eq!(default_attempts, Some(3));

        let config = client_config(Some(6));
        assert_eq!(config.retry_policy.map(|p| p.max_attempts()), Some(6));
        assert!(Client::with_config(client_config(Some(1))).is_ok());
    }

    #[test]
    fn test_parse_feed_file() {
        let file = temp_file(".xml", FEED);
        let podcast = parse_feed_file(file.path(), Options::defaults()).expect("Should parse");

        assert_eq!(podcast.meta.get("title"), Some(&Value::from("CLI Show")));
        assert_eq!(podcast.episodes[0].get("duration"), Some(&Value::Integer(60)));
    }

    #[test]
    fn test_render_compact_and_pretty() {
        let file = temp_file(".xml", FEED);
        let podcast = parse_feed_file(file.path(), Options::defaults()).expect("Should parse");

        let compact = render(&podcast, true).expect("Should render");
        assert!(!compact.contains('\n'));
        assert!(compact.starts_with(r#"{"meta":{"title":"CLI Show"}"#));

        let pretty = render(&podcast, false).expect("Should render");
        assert!(pretty.contains("\n  \"episodes\""));
    }
}
