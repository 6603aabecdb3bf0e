//! A full sync run: one feed download pushed to every configured channel.

use log::{error, info};
use reqwest::Client;

use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::feed::FeedSource;
use crate::marketplace::{MarketClient, SellerClient};
use crate::sync::{sync_channel, ChannelReport};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub feed_records: usize,
    pub channels: Vec<ChannelReport>,
}

/// Fetches the feed once, then syncs Seller and each Market channel in turn.
///
/// The first error aborts the remaining channels; batches already pushed
/// stay pushed.
pub async fn run(config: &Config, http: &Client, feed: &dyn FeedSource) -> Result<RunSummary> {
    let inventory = feed.fetch_inventory().await?;
    info!("Vendor feed has {} records", inventory.len());

    let mut channels = Vec::new();

    if let Some(seller) = &config.seller {
        let client = SellerClient::new(http.clone(), seller.client_id.clone(), seller.token.clone())
            .with_base_url(&seller.api_url);
        channels.push(sync_channel(&client, &inventory, None, seller.limits).await?);
    }

    if let Some(market) = &config.market {
        for channel in &market.channels {
            info!(
                "Market {} channel: campaign {}, warehouse {}",
                channel.label, channel.campaign_id, channel.warehouse_id
            );
            let client = MarketClient::new(
                http.clone(),
                market.token.clone(),
                channel.campaign_id.clone(),
            )
            .with_base_url(&market.api_url);
            channels.push(
                sync_channel(&client, &inventory, Some(channel.warehouse_id), market.limits)
                    .await?,
            );
        }
    }

    let summary = RunSummary {
        feed_records: inventory.len(),
        channels,
    };
    log_summary(&summary);
    Ok(summary)
}

fn log_summary(summary: &RunSummary) {
    for report in &summary.channels {
        info!(
            "{}: {} offers, {} in stock, {} prices",
            report.channel,
            report.stocks.len(),
            report.in_stock.len(),
            report.prices.len()
        );
    }
    info!("Sync completed successfully.");
}

/// Reports a failed run; transport failures get their own wording.
pub fn report_failure(err: &SyncError) -> &'static str {
    let headline = match err {
        SyncError::Timeout(_) => "Request timed out",
        SyncError::Connection(_) => "Connection error",
        SyncError::ConfigurationMissing(_) | SyncError::ConfigurationInvalid { .. } => {
            "Configuration error"
        }
        _ => "Sync failed",
    };
    error!("{headline}: {err}");
    headline
}
