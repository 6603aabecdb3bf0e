//! Vendor inventory feed: download, unpack and parse the stock sheet.

mod archive;
mod file;
mod sheet;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::InventoryRecord;

pub use archive::{HttpArchiveFeed, DEFAULT_ARCHIVE_MEMBER, DEFAULT_FEED_URL};
pub use file::FileFeed;
pub use sheet::{parse_sheet, CODE_COLUMN, PRICE_COLUMN, QUANTITY_COLUMN};

/// Source of the vendor inventory list for one sync run.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetches and parses the full inventory.
    async fn fetch_inventory(&self) -> Result<Vec<InventoryRecord>>;
}
