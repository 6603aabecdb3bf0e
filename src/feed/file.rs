//! Vendor stock sheet read from a local file.

use std::path::PathBuf;

use async_trait::async_trait;
use log::info;

use super::{sheet::parse_sheet, FeedSource};
use crate::error::Result;
use crate::models::InventoryRecord;

/// Reads a previously downloaded sheet or a CSV export from disk.
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedSource for FileFeed {
    async fn fetch_inventory(&self) -> Result<Vec<InventoryRecord>> {
        info!("Reading vendor stock sheet from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await?;
        parse_sheet(&self.path.to_string_lossy(), bytes)
    }
}
