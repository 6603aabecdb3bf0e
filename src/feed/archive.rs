//! Vendor stock archive published over HTTP.

use std::io::{Cursor, Read};

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use zip::ZipArchive;

use super::{sheet::parse_sheet, FeedSource};
use crate::error::Result;
use crate::http::ensure_success;
use crate::models::InventoryRecord;

/// Default location of the vendor stock archive
pub const DEFAULT_FEED_URL: &str = "https://timeworld.ru/upload/files/ostatki.zip";
/// Default sheet inside the archive
pub const DEFAULT_ARCHIVE_MEMBER: &str = "ostatki.xls";

/// Downloads a ZIP archive and parses one sheet from it, entirely in memory.
pub struct HttpArchiveFeed {
    client: Client,
    url: String,
    member: String,
}

impl HttpArchiveFeed {
    pub fn new(client: Client, url: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            member: member.into(),
        }
    }
}

#[async_trait]
impl FeedSource for HttpArchiveFeed {
    async fn fetch_inventory(&self) -> Result<Vec<InventoryRecord>> {
        info!("Downloading vendor stock archive from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let response = ensure_success(response).await?;
        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes", bytes.len());

        let sheet = extract_member(&bytes, &self.member)?;
        parse_sheet(&self.member, sheet)
    }
}

/// Reads one named file out of a ZIP archive.
fn extract_member(archive: &[u8], member: &str) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(archive))?;
    let mut file = archive.by_name(member)?;
    let mut contents = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut contents)?;
    debug!("Extracted {member} ({} bytes)", contents.len());
    Ok(contents)
}
