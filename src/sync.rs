//! Per-channel sync: fetch the catalog, reconcile, push batches in order.

use log::{debug, info, warn};

use crate::batch::divide;
use crate::error::Result;
use crate::marketplace::{MarketplaceClient, NextPage};
use crate::models::{now_seconds, InventoryRecord, PriceUpdate, StockUpdate};
use crate::reconcile::{in_stock, reconcile_prices, reconcile_stocks};

/// Maximum records per push call, per update kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLimits {
    pub stocks: usize,
    pub prices: usize,
}

/// Everything sent to one channel during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReport {
    pub channel: String,
    pub catalog_size: usize,
    /// All stock updates, one per catalog offer
    pub stocks: Vec<StockUpdate>,
    /// Stock updates with a non-zero count
    pub in_stock: Vec<StockUpdate>,
    pub prices: Vec<PriceUpdate>,
}

/// Reads every catalog page and returns the offer ids in listing order.
///
/// Stops when the platform's own signal says the listing is exhausted: an
/// empty cursor, or as many ids read as the reported total. A page without
/// ids also ends the listing.
pub async fn fetch_offer_ids(client: &dyn MarketplaceClient) -> Result<Vec<String>> {
    let mut offer_ids = Vec::new();
    let mut cursor = String::new();
    let mut pages = 0usize;

    loop {
        let page = client.list_catalog_page(&cursor).await?;
        pages += 1;
        let received = page.offer_ids.len();
        offer_ids.extend(page.offer_ids);

        let next_cursor = match page.next {
            NextPage::Cursor(next) if next.is_empty() => break,
            NextPage::Cursor(next) => next,
            NextPage::Total { total, .. } if offer_ids.len() >= total => break,
            NextPage::Total { cursor: next, .. } => next,
        };

        if received == 0 {
            warn!(
                "{}: empty catalog page before end of listing, stopping after {} ids",
                client.name(),
                offer_ids.len()
            );
            break;
        }
        cursor = next_cursor;
    }

    info!(
        "{}: fetched {} offer ids in {} page(s)",
        client.name(),
        offer_ids.len(),
        pages
    );
    Ok(offer_ids)
}

/// Sends stock updates in batches of at most `cap`, one after another.
///
/// Returns the number of push calls made.
pub async fn push_stocks(
    client: &dyn MarketplaceClient,
    stocks: &[StockUpdate],
    cap: usize,
) -> Result<usize> {
    let mut calls = 0;
    for batch in divide(stocks, cap)? {
        debug!("{}: pushing stock batch of {}", client.name(), batch.len());
        client.push_stock_updates(batch).await?;
        calls += 1;
    }
    Ok(calls)
}

/// Sends price updates in batches of at most `cap`, one after another.
///
/// Returns the number of push calls made.
pub async fn push_prices(
    client: &dyn MarketplaceClient,
    prices: &[PriceUpdate],
    cap: usize,
) -> Result<usize> {
    let mut calls = 0;
    for batch in divide(prices, cap)? {
        debug!("{}: pushing price batch of {}", client.name(), batch.len());
        client.push_price_updates(batch).await?;
        calls += 1;
    }
    Ok(calls)
}

/// Syncs one platform channel: stocks first, then prices.
pub async fn sync_channel(
    client: &dyn MarketplaceClient,
    inventory: &[InventoryRecord],
    warehouse_id: Option<u64>,
    limits: BatchLimits,
) -> Result<ChannelReport> {
    info!("{}: starting sync", client.name());
    let catalog = fetch_offer_ids(client).await?;

    let stocks = reconcile_stocks(inventory, &catalog, warehouse_id, now_seconds())?;
    let calls = push_stocks(client, &stocks, limits.stocks).await?;
    info!(
        "{}: pushed {} stock updates in {} batch(es)",
        client.name(),
        stocks.len(),
        calls
    );

    let prices = reconcile_prices(inventory, &catalog)?;
    let calls = push_prices(client, &prices, limits.prices).await?;
    info!(
        "{}: pushed {} price updates in {} batch(es)",
        client.name(),
        prices.len(),
        calls
    );

    let in_stock = in_stock(&stocks);
    Ok(ChannelReport {
        channel: client.name().to_string(),
        catalog_size: catalog.len(),
        stocks,
        in_stock,
        prices,
    })
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
