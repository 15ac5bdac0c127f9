// FILE: crates/cli/src/main.rs

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

mod commands;

fn options_arg() -> Arg {
    Arg::new("options")
        .short('o')
        .long("options")
        .value_name("FILE")
        .help("Options file (.json, otherwise TOML)")
}

fn compact_arg() -> Arg {
    Arg::new("compact")
        .short('c')
        .long("compact")
        .help("Print single-line JSON")
        .action(ArgAction::SetTrue)
}

fn build_cli() -> Command {
    Command::new("podfeed")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Normalize podcast RSS feeds into JSON")
        .subcommand(
            Command::new("parse")
                .about("Normalize a feed file")
                .arg(Arg::new("file").required(true).value_name("FILE").help("Path to the feed XML"))
                .arg(options_arg())
                .arg(compact_arg()),
        )
        .subcommand(
            Command::new("fetch")
                .about("Fetch and normalize a feed, following moves")
                .arg(Arg::new("url").required(true).value_name("URL").help("Feed URL"))
                .arg(options_arg())
                .arg(
                    Arg::new("max-hops")
                        .long("max-hops")
                        .value_name("N")
                        .help("Moved-feed hops to follow")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("retries")
                        .long("retries")
                        .value_name("N")
                        .help("Attempts per request for transient failures")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(compact_arg()),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("parse", sub_matches)) => commands::parse_file(sub_matches),
        Some(("fetch", sub_matches)) => commands::fetch_url(sub_matches).await,
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
