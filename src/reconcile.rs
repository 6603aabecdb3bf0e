//! Reconciliation of the vendor feed against a marketplace catalog.
//!
//! The feed and the catalog are sourced independently and may disagree:
//! the feed lists watches a marketplace does not carry, and a marketplace
//! keeps offers the vendor no longer mentions. Stock updates cover the whole
//! catalog (unmentioned offers are zeroed); price updates cover only offers
//! present on both sides.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::error::Result;
use crate::models::{Currency, InventoryRecord, PriceUpdate, StockUpdate};
use crate::normalize::{normalize_price, normalize_quantity};

/// Catalog split into ids the feed mentioned and ids it did not.
#[derive(Debug, Default, PartialEq, Eq)]
struct CatalogPartition<'a> {
    /// Feed records that claimed a catalog id, in feed order
    matched: Vec<&'a InventoryRecord>,
    /// Catalog ids left over, in catalog order
    unmatched: Vec<&'a str>,
}

/// Matches feed records against catalog ids without mutating either list.
///
/// Each catalog occurrence can be claimed by one feed record. A record whose
/// code has no unclaimed occurrence left is skipped, and the first
/// occurrences of an id are the ones claimed, so with duplicate catalog ids
/// the later copies end up unmatched.
fn partition_catalog<'a>(
    inventory: &'a [InventoryRecord],
    catalog: &'a [String],
) -> CatalogPartition<'a> {
    let mut available: HashMap<&str, usize> = HashMap::new();
    for offer_id in catalog {
        *available.entry(offer_id.as_str()).or_default() += 1;
    }

    let mut claimed: HashMap<&str, usize> = HashMap::new();
    let mut matched = Vec::new();
    for record in inventory {
        let code = record.code.as_str();
        if let Some(left) = available.get_mut(code) {
            if *left > 0 {
                *left -= 1;
                *claimed.entry(code).or_default() += 1;
                matched.push(record);
            }
        }
    }

    let mut unmatched = Vec::new();
    for offer_id in catalog {
        match claimed.get_mut(offer_id.as_str()) {
            Some(n) if *n > 0 => *n -= 1,
            _ => unmatched.push(offer_id.as_str()),
        }
    }

    CatalogPartition { matched, unmatched }
}

/// Builds a stock update for every catalog offer.
///
/// Offers found in the feed come first, in feed order, with their normalized
/// quantity. Remaining catalog offers follow in catalog order with count 0.
pub fn reconcile_stocks(
    inventory: &[InventoryRecord],
    catalog: &[String],
    warehouse_id: Option<u64>,
    timestamp: DateTime<Utc>,
) -> Result<Vec<StockUpdate>> {
    let partition = partition_catalog(inventory, catalog);
    debug!(
        "Catalog of {} offers: {} matched in feed, {} unmatched",
        catalog.len(),
        partition.matched.len(),
        partition.unmatched.len()
    );

    let mut stocks = Vec::with_capacity(partition.matched.len() + partition.unmatched.len());
    for record in partition.matched {
        stocks.push(StockUpdate {
            offer_id: record.code.clone(),
            warehouse_id,
            count: normalize_quantity(&record.quantity)?,
            timestamp,
        });
    }
    for offer_id in partition.unmatched {
        stocks.push(StockUpdate {
            offer_id: offer_id.to_string(),
            warehouse_id,
            count: 0,
            timestamp,
        });
    }

    info!("Prepared {} stock updates", stocks.len());
    Ok(stocks)
}

/// Builds a price update for every feed record carried by the catalog.
///
/// Records the catalog does not know are skipped; catalog offers missing
/// from the feed get no price entry.
pub fn reconcile_prices(
    inventory: &[InventoryRecord],
    catalog: &[String],
) -> Result<Vec<PriceUpdate>> {
    let known: HashSet<&str> = catalog.iter().map(String::as_str).collect();

    let prices = inventory
        .iter()
        .filter(|record| known.contains(record.code.as_str()))
        .map(|record| {
            Ok(PriceUpdate {
                offer_id: record.code.clone(),
                price: normalize_price(&record.price)?,
                currency: Currency::Rub,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Prepared {} price updates", prices.len());
    Ok(prices)
}

/// Stock updates with a non-zero count, for reporting.
pub fn in_stock(stocks: &[StockUpdate]) -> Vec<StockUpdate> {
    stocks.iter().filter(|s| s.is_in_stock()).cloned().collect()
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
