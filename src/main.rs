//! Watch Stock Sync
//!
//! Pushes the vendor's published stock and prices to the Seller and Market
//! platforms. Meant to be run periodically (cron, systemd timer).

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use watch_stock_sync::feed::{FeedSource, FileFeed, HttpArchiveFeed};
use watch_stock_sync::http::build_client;
use watch_stock_sync::{report_failure, run, Config, Platform};

/// Sync vendor watch stock and prices to marketplace seller accounts
#[derive(Parser, Debug)]
#[command(name = "watch_stock_sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Marketplaces to sync
    #[arg(long, value_enum, default_value_t = Platform::All)]
    platform: Platform,

    /// Read the stock sheet from a local file instead of downloading it
    #[arg(long)]
    feed_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting watch_stock_sync ({:?})", args.platform);

    let config = match Config::from_env(args.platform) {
        Ok(config) => config,
        Err(e) => {
            report_failure(&e);
            std::process::exit(1);
        }
    };

    let http = match build_client(Duration::from_secs(args.timeout_secs)) {
        Ok(client) => client,
        Err(e) => {
            report_failure(&e);
            std::process::exit(1);
        }
    };

    let feed: Box<dyn FeedSource> = match args.feed_file {
        Some(path) => Box::new(FileFeed::new(path)),
        None => Box::new(HttpArchiveFeed::new(
            http.clone(),
            config.feed.url.clone(),
            config.feed.archive_member.clone(),
        )),
    };

    // Failures are reported, not propagated: the next scheduled run retries.
    if let Err(e) = run(&config, &http, feed.as_ref()).await {
        report_failure(&e);
    }
}
