//! Marketplace seller API clients.
//!
//! Both platforms expose the same three operations (catalog listing, stock
//! import, price import) with different wire formats, batch limits and
//! pagination signals. [`MarketplaceClient`] is the seam the sync
//! orchestrator works against.

mod market;
mod seller;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{PriceUpdate, StockUpdate};

pub use market::{MarketClient, DEFAULT_MARKET_API_URL, MARKET_PAGE_SIZE};
pub use seller::{SellerClient, DEFAULT_SELLER_API_URL, SELLER_PAGE_SIZE};

/// How a catalog page tells the caller whether more pages follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Opaque token for the next page; empty when the listing is exhausted.
    Cursor(String),
    /// Total catalog size; the listing is exhausted once that many ids were read.
    Total { total: usize, cursor: String },
}

/// One page of a marketplace catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub offer_ids: Vec<String>,
    pub next: NextPage,
}

/// A marketplace seller account (or one campaign of it).
#[async_trait]
pub trait MarketplaceClient: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &str;

    /// Fetches one catalog page; an empty cursor requests the first page.
    async fn list_catalog_page(&self, cursor: &str) -> Result<CatalogPage>;

    /// Sends one batch of stock levels.
    async fn push_stock_updates(&self, batch: &[StockUpdate]) -> Result<()>;

    /// Sends one batch of prices.
    async fn push_price_updates(&self, batch: &[PriceUpdate]) -> Result<()>;
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
